use std::str::FromStr;
use yew::prelude::*;

/// UI languages. English is the fallback dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Es,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
        }
    }
}

impl FromStr for Lang {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Lang::En),
            "es" => Ok(Lang::Es),
            _ => Err(()),
        }
    }
}

/// Look up `key` for `lang`: active dictionary, then the English one, then
/// the raw key so a missing entry is at least visible.
pub fn translate(lang: Lang, key: &str) -> String {
    lookup(lang, key)
        .or_else(|| lookup(Lang::En, key))
        .map(|s| s.to_string())
        .unwrap_or_else(|| key.to_string())
}

/// `translate`, then replace every `{name}` occurrence for each var.
pub fn translate_with(lang: Lang, key: &str, vars: &[(&str, String)]) -> String {
    let mut text = translate(lang, key);
    for (name, value) in vars {
        text = text.replace(&format!("{{{}}}", name), value);
    }
    text
}

/// Language selection shared with the component tree.
///
/// Constructed once in `main` and provided via `ContextProvider`; there is
/// no ambient language global.
#[derive(Clone, PartialEq)]
pub struct LanguageContext {
    pub lang: Lang,
    pub set_lang: Callback<Lang>,
}

impl LanguageContext {
    pub fn t(&self, key: &str) -> String {
        translate(self.lang, key)
    }

    pub fn t_with(&self, key: &str, vars: &[(&str, String)]) -> String {
        translate_with(self.lang, key, vars)
    }
}

/// Fetch the language context, defaulting to English outside a provider.
#[hook]
pub fn use_language() -> LanguageContext {
    use_context::<LanguageContext>().unwrap_or_else(|| LanguageContext {
        lang: Lang::En,
        set_lang: Callback::noop(),
    })
}

fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    match lang {
        Lang::En => lookup_en(key),
        Lang::Es => lookup_es(key),
    }
}

fn lookup_en(key: &str) -> Option<&'static str> {
    let text = match key {
        "app_title" => "AI Finance",
        "app_subtitle" => "Receipts and expenses",
        "tab_upload_receipt" => "Home",
        "tab_expenses" => "Expenses",
        "action_logout" => "Logout",

        "login_title" => "Login",
        "login_subtitle" => "Sign in to upload receipts and view your expenses.",
        "login_email" => "Email",
        "login_password" => "Password",
        "login_button" => "Sign in",
        "login_loading" => "Signing in...",
        "login_register" => "Create account",
        "session_checking" => "Checking session...",

        "register_title" => "Create account",
        "register_subtitle" => "Choose your default currency for the app.",
        "register_email" => "Email",
        "register_password" => "Password",
        "register_currency" => "Currency",
        "register_button" => "Create account",
        "register_loading" => "Creating...",
        "register_back_to_login" => "Back to login",

        "receipt_upload_title" => "Upload receipt",
        "receipt_upload_image_label" => "Image",
        "receipt_upload_select_image_error" => "Select an image (JPG/PNG).",
        "receipt_upload_process" => "Process receipt",
        "receipt_upload_processing" => "Processing...",

        "receipt_preview_title" => "Expenses preview (editable)",
        "receipt_discard" => "Discard",
        "receipt_save" => "Save",
        "receipt_saving" => "Saving...",
        "receipt_discard_confirm" => "Are you sure you do not want to process these charges?",
        "receipt_saved_ok" => "Saved OK. Created {count} expenses.",
        "receipt_invalid_date" => "Invalid date. Use DD/MM/YYYY",

        "expenses_title" => "Expenses",
        "expenses_refresh" => "Refresh",
        "expenses_loading" => "Loading...",
        "expenses_period_day" => "Day",
        "expenses_period_week" => "Week",
        "expenses_period_month" => "Month",
        "expenses_period_budget" => "Budget",
        "expenses_total" => "Total: {total}",

        "budget_month" => "Month",
        "budget_category" => "Category",
        "budget_amount" => "Amount",
        "budget_save" => "Save budget",
        "budget_saving" => "Saving...",
        "budget_refresh" => "Refresh",
        "budget_loading" => "Loading...",
        "budget_delete" => "Delete",
        "budget_empty" => "No budgets for this month yet.",
        "budget_currency_locked" => "Currency is locked to your account: {currency}",
        "budget_error_month" => "Select a month.",
        "budget_error_category" => "Select a category.",
        "budget_error_amount" => "Enter a valid amount (> 0).",

        "table_date" => "Date",
        "table_description" => "Description",
        "table_category" => "Category",
        "table_amount" => "Amount",
        "table_currency" => "Currency",

        _ => return None,
    };
    Some(text)
}

fn lookup_es(key: &str) -> Option<&'static str> {
    // The brand name is untranslated, so "app_title" lives only in the
    // English dictionary and resolves through the fallback chain.
    let text = match key {
        "app_subtitle" => "Recibos y gastos",
        "tab_upload_receipt" => "Inicio",
        "tab_expenses" => "Gastos",
        "action_logout" => "Salir",

        "login_title" => "Login",
        "login_subtitle" => "Inicia sesión para subir recibos y ver tus gastos.",
        "login_email" => "Email",
        "login_password" => "Password",
        "login_button" => "Entrar",
        "login_loading" => "Entrando...",
        "login_register" => "Crear cuenta",
        "session_checking" => "Verificando sesión...",

        "register_title" => "Crear cuenta",
        "register_subtitle" => "Elige tu moneda por defecto para la app.",
        "register_email" => "Email",
        "register_password" => "Password",
        "register_currency" => "Moneda",
        "register_button" => "Crear cuenta",
        "register_loading" => "Creando...",
        "register_back_to_login" => "Volver al login",

        "receipt_upload_title" => "Subir recibo",
        "receipt_upload_image_label" => "Imagen",
        "receipt_upload_select_image_error" => "Selecciona una imagen (JPG/PNG).",
        "receipt_upload_process" => "Procesar recibo",
        "receipt_upload_processing" => "Procesando...",

        "receipt_preview_title" => "Preview de gastos (editable)",
        "receipt_discard" => "Descartar",
        "receipt_save" => "Guardar",
        "receipt_saving" => "Guardando...",
        "receipt_discard_confirm" => "¿Está seguro que no quiere procesar estos cargos?",
        "receipt_saved_ok" => "Guardado OK. Se crearon {count} gastos.",
        "receipt_invalid_date" => "Fecha inválida. Use formato DD/MM/YYYY",

        "expenses_title" => "Gastos",
        "expenses_refresh" => "Refrescar",
        "expenses_loading" => "Cargando...",
        "expenses_period_day" => "Día",
        "expenses_period_week" => "Semana",
        "expenses_period_month" => "Mes",
        "expenses_period_budget" => "Presupuesto",
        "expenses_total" => "Total: {total}",

        "budget_month" => "Mes",
        "budget_category" => "Categoría",
        "budget_amount" => "Monto",
        "budget_save" => "Guardar presupuesto",
        "budget_saving" => "Guardando...",
        "budget_refresh" => "Refrescar",
        "budget_loading" => "Cargando...",
        "budget_delete" => "Eliminar",
        "budget_empty" => "Aún no hay presupuestos para este mes.",
        "budget_currency_locked" => "La moneda está bloqueada a tu cuenta: {currency}",
        "budget_error_month" => "Selecciona un mes.",
        "budget_error_category" => "Selecciona una categoría.",
        "budget_error_amount" => "Ingresa un monto válido (> 0).",

        "table_date" => "Fecha",
        "table_description" => "Descripción",
        "table_category" => "Categoría",
        "table_amount" => "Monto",
        "table_currency" => "Moneda",

        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_language_wins() {
        assert_eq!(translate(Lang::Es, "expenses_refresh"), "Refrescar");
        assert_eq!(translate(Lang::En, "expenses_refresh"), "Refresh");
    }

    #[test]
    fn test_unknown_key_returns_the_key() {
        assert_eq!(translate(Lang::En, "no_such_key"), "no_such_key");
        assert_eq!(translate(Lang::Es, "no_such_key"), "no_such_key");
    }

    #[test]
    fn test_missing_entry_falls_back_to_english() {
        assert!(lookup(Lang::Es, "app_title").is_none());
        assert_eq!(translate(Lang::Es, "app_title"), "AI Finance");
    }

    #[test]
    fn test_placeholder_substitution_hits_all_occurrences() {
        assert_eq!(
            translate_with(Lang::En, "receipt_saved_ok", &[("count", "3".to_string())]),
            "Saved OK. Created 3 expenses."
        );
        assert_eq!(
            translate_with(Lang::Es, "expenses_total", &[("total", "12.50".to_string())]),
            "Total: 12.50"
        );
    }

    #[test]
    fn test_lang_tag_round_trip() {
        assert_eq!("en".parse::<Lang>(), Ok(Lang::En));
        assert_eq!("es".parse::<Lang>(), Ok(Lang::Es));
        assert!("fr".parse::<Lang>().is_err());
        assert_eq!(Lang::Es.as_str(), "es");
    }
}
