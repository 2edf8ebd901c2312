use shared::{Budget, Category, CreateBudgetRequest};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::{local_today, month_key};
use crate::services::logging::Logger;

/// Per-field validation errors for the budget form, as translation keys.
/// A populated field means the create call was aborted locally.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BudgetFieldErrors {
    pub month: Option<&'static str>,
    pub category: Option<&'static str>,
    pub amount: Option<&'static str>,
}

impl BudgetFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.category.is_none() && self.amount.is_none()
    }
}

/// Validate the budget form locally before any network call.
///
/// Month and category must be chosen and the amount must parse to a finite
/// number greater than zero.
pub fn validate_budget_form(
    month: &str,
    category: &str,
    amount_input: &str,
) -> Result<(Category, f64), BudgetFieldErrors> {
    let mut errors = BudgetFieldErrors::default();

    if month.is_empty() {
        errors.month = Some("budget_error_month");
    }
    if category.is_empty() {
        errors.category = Some("budget_error_category");
    }

    let amount = amount_input.trim().parse::<f64>().unwrap_or(f64::NAN);
    if !amount.is_finite() || amount <= 0.0 {
        errors.amount = Some("budget_error_amount");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Category came from the closed select, so parsing cannot fail.
    let category = category.parse().unwrap_or(Category::Other);
    Ok((category, amount))
}

#[derive(Clone, PartialEq)]
pub struct BudgetsState {
    pub budgets: Vec<Budget>,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
    pub month: String,
    pub category: String,
    pub amount_input: String,
    pub field_errors: BudgetFieldErrors,
}

#[derive(Clone, PartialEq)]
pub struct UseBudgetsActions {
    pub refresh: Callback<()>,
    pub create: Callback<()>,
    pub delete: Callback<i64>,
    pub set_month: Callback<String>,
    pub set_category: Callback<String>,
    pub set_amount_input: Callback<String>,
}

pub struct UseBudgetsResult {
    pub state: BudgetsState,
    pub actions: UseBudgetsActions,
}

/// Budget list + create/delete for the selected month.
///
/// Every successful mutation reloads the list; the list is always fully
/// replaced, never patched in place.
///
/// The month to fetch travels as the `load` callback's payload and the
/// form fields reach `create` through its `use_callback` deps; derefing a
/// captured `UseStateHandle` inside a `()`-deps closure would read the
/// first-render snapshot and submit empty values forever.
#[hook]
pub fn use_budgets(api_client: &ApiClient) -> UseBudgetsResult {
    let budgets = use_state(Vec::<Budget>::new);
    let loading = use_state(|| false);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);
    let month = use_state(|| month_key(local_today()));
    let category = use_state(String::new);
    let amount_input = use_state(String::new);
    let field_errors = use_state(BudgetFieldErrors::default);

    // Fetch the list for an explicit month. The payload, not a handle
    // deref, decides what is fetched, so this callback stays valid across
    // renders.
    let load = {
        let api_client = api_client.clone();
        let budgets = budgets.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |month: String, _| {
            let api_client = api_client.clone();
            let budgets = budgets.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                error.set(None);
                loading.set(true);

                let selected = if month.is_empty() { None } else { Some(month.as_str()) };
                match api_client.get_budgets(selected).await {
                    Ok(data) => budgets.set(data),
                    Err(e) => {
                        Logger::error("use_budgets", &format!("Failed to fetch budgets: {}", e));
                        error.set(Some(e.to_string()));
                    }
                }

                loading.set(false);
            });
        })
    };

    let refresh = {
        let load = load.clone();
        use_callback((*month).clone(), move |_, month: &String| {
            load.emit(month.clone());
        })
    };

    let create = {
        let api_client = api_client.clone();
        let saving = saving.clone();
        let error = error.clone();
        let amount_input_handle = amount_input.clone();
        let field_errors = field_errors.clone();
        let load = load.clone();

        use_callback(
            ((*month).clone(), (*category).clone(), (*amount_input).clone()),
            move |_, deps| {
                let (month_value, category_value, amount_value) = deps.clone();
                let api_client = api_client.clone();
                let saving = saving.clone();
                let error = error.clone();
                let amount_input = amount_input_handle.clone();
                let field_errors = field_errors.clone();
                let load = load.clone();

                let (parsed_category, parsed_amount) =
                    match validate_budget_form(&month_value, &category_value, &amount_value) {
                        Ok(parsed) => {
                            field_errors.set(BudgetFieldErrors::default());
                            parsed
                        }
                        Err(errors) => {
                            field_errors.set(errors);
                            return;
                        }
                    };

                spawn_local(async move {
                    error.set(None);
                    saving.set(true);

                    let request = CreateBudgetRequest {
                        month: month_value.clone(),
                        category: parsed_category,
                        amount: parsed_amount,
                    };

                    match api_client.create_budget(&request).await {
                        Ok(_) => {
                            amount_input.set(String::new());
                            load.emit(month_value);
                        }
                        Err(e) => {
                            error.set(Some(e.to_string()));
                        }
                    }

                    saving.set(false);
                });
            },
        )
    };

    let delete = {
        let api_client = api_client.clone();
        let error = error.clone();
        let load = load.clone();

        use_callback((*month).clone(), move |id: i64, month| {
            let api_client = api_client.clone();
            let error = error.clone();
            let load = load.clone();
            let month = month.clone();

            spawn_local(async move {
                error.set(None);
                match api_client.delete_budget(id).await {
                    Ok(()) => load.emit(month),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    // A month change fetches the month just chosen, not whatever the
    // state holds by the time a refresh lands.
    let set_month = {
        let month = month.clone();
        let load = load.clone();
        use_callback((), move |next: String, _| {
            month.set(next.clone());
            load.emit(next);
        })
    };

    let set_category = {
        let category = category.clone();
        use_callback((), move |next: String, _| category.set(next))
    };

    let set_amount_input = {
        let amount_input = amount_input.clone();
        use_callback((), move |next: String, _| amount_input.set(next))
    };

    // Initial list for the default (current) month.
    use_effect_with((), {
        let load = load.clone();
        let initial_month = (*month).clone();
        move |_| {
            load.emit(initial_month);
            || ()
        }
    });

    let state = BudgetsState {
        budgets: (*budgets).clone(),
        loading: *loading,
        saving: *saving,
        error: (*error).clone(),
        month: (*month).clone(),
        category: (*category).clone(),
        amount_input: (*amount_input).clone(),
        field_errors: (*field_errors).clone(),
    };

    let actions = UseBudgetsActions {
        refresh,
        create,
        delete,
        set_month,
        set_category,
        set_amount_input,
    };

    UseBudgetsResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form_parses() {
        let (category, amount) = validate_budget_form("2024-06", "FOOD", "25.50").unwrap();
        assert_eq!(category, Category::Food);
        assert_eq!(amount, 25.5);
    }

    #[test]
    fn test_missing_month_and_category_flag_their_fields() {
        let errors = validate_budget_form("", "", "10").unwrap_err();
        assert_eq!(errors.month, Some("budget_error_month"));
        assert_eq!(errors.category, Some("budget_error_category"));
        assert_eq!(errors.amount, None);
    }

    #[test]
    fn test_amount_must_be_finite_and_positive() {
        assert!(validate_budget_form("2024-06", "FOOD", "0").is_err());
        assert!(validate_budget_form("2024-06", "FOOD", "-5").is_err());
        assert!(validate_budget_form("2024-06", "FOOD", "abc").is_err());
        assert!(validate_budget_form("2024-06", "FOOD", "inf").is_err());
        assert!(validate_budget_form("2024-06", "FOOD", "").is_err());
    }

    #[test]
    fn test_all_fields_invalid_reports_all() {
        let errors = validate_budget_form("", "", "nope").unwrap_err();
        assert!(errors.month.is_some());
        assert!(errors.category.is_some());
        assert!(errors.amount.is_some());
    }

    #[test]
    fn test_populated_form_reaches_the_request_values() {
        // The create callback feeds the selected values straight into
        // validation; a chosen month/category with a typed amount must
        // come back as the exact request payload parts.
        let (category, amount) = validate_budget_form("2026-08", "GROCERIES", " 120.00 ").unwrap();
        assert_eq!(category, Category::Groceries);
        assert_eq!(amount, 120.0);
    }
}
