use shared::{ConfirmReceiptRequest, ExpensePreview, NewExpense};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::DateField;
use crate::services::i18n::{translate, Lang};
use crate::services::logging::Logger;

/// One editable preview row. Client-only and unsaved; currency and
/// category stay loose strings until save-time normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRow {
    pub amount_input: String,
    pub currency: String,
    pub description: String,
    pub category: String,
    pub date: DateField,
}

impl DraftRow {
    pub fn from_preview(preview: &ExpensePreview) -> Self {
        Self {
            amount_input: format!("{}", preview.amount),
            currency: preview.currency.clone(),
            description: preview.description.clone(),
            category: preview.category.clone(),
            date: DateField::from_iso(preview.expense_date.as_deref()),
        }
    }

    /// Normalize for the confirm payload: uppercase currency (CAD when
    /// blank), trimmed description, trimmed category (OTHER when blank),
    /// amount coerced to a number, null for an unresolved date.
    pub fn to_new_expense(&self) -> NewExpense {
        let currency = self.currency.trim().to_ascii_uppercase();
        let category = self.category.trim().to_string();
        NewExpense {
            amount: self.amount_input.trim().parse().unwrap_or(0.0),
            currency: if currency.is_empty() { "CAD".to_string() } else { currency },
            description: self.description.trim().to_string(),
            category: if category.is_empty() { "OTHER".to_string() } else { category },
            expense_date: self.date.iso_value(),
        }
    }
}

/// Edit applied to one draft row.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftPatch {
    Description(String),
    Category(String),
    Amount(String),
    Currency(String),
    /// A keystroke in the date field; re-formats, never validates.
    DateInput(String),
    /// Field exit; the validation checkpoint.
    DateCommit,
}

/// Apply one edit to a draft row. `Err` means a date commit was rejected;
/// the row keeps its `Invalid` state and the caller surfaces the alert.
fn apply_patch(row: &mut DraftRow, patch: DraftPatch) -> Result<(), ()> {
    match patch {
        DraftPatch::Description(value) => row.description = value,
        DraftPatch::Category(value) => row.category = value,
        DraftPatch::Amount(value) => row.amount_input = value,
        DraftPatch::Currency(value) => row.currency = value,
        DraftPatch::DateInput(value) => row.date = row.date.keystroke(&value),
        DraftPatch::DateCommit => match row.date.commit() {
            Ok(settled) => row.date = settled,
            Err(invalid) => {
                row.date = invalid;
                return Err(());
            }
        },
    }
    Ok(())
}

/// Where the intake flow stands.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptPhase {
    Idle,
    Uploading,
    Previewing,
    Saving,
    Saved { created: usize },
}

impl ReceiptPhase {
    /// Save is only legal from the preview. `Saving` and the `Saved`
    /// confirmation window both lock it out, so a second click cannot
    /// confirm the same receipt twice.
    pub fn accepts_save(&self) -> bool {
        matches!(self, ReceiptPhase::Previewing)
    }
}

/// Inline error for the upload form.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptError {
    /// Submit without a file selected; caught before any network call.
    MissingFile,
    Api(String),
}

#[derive(Clone, PartialEq)]
pub struct ReceiptState {
    pub phase: ReceiptPhase,
    pub file: Option<File>,
    pub receipt_path: Option<String>,
    pub drafts: Vec<DraftRow>,
    pub error: Option<ReceiptError>,
}

#[derive(Clone, PartialEq)]
pub struct UseReceiptActions {
    pub set_file: Callback<Option<File>>,
    pub upload: Callback<()>,
    pub update_row: Callback<(usize, DraftPatch)>,
    pub save: Callback<()>,
    pub discard: Callback<()>,
}

pub struct UseReceiptResult {
    pub state: ReceiptState,
    pub actions: UseReceiptActions,
}

/// Receipt intake flow:
/// `Idle -> Uploading -> Previewing -> (Saving -> Saved -> Idle)` or back
/// to `Idle` via a confirmed discard. Every failure path lands on a stable
/// previous state with the drafts intact.
///
/// The action callbacks read current state through their `use_callback`
/// deps, never through a captured `UseStateHandle` deref: a handle deref
/// inside a `()`-deps closure is a first-render snapshot and would make
/// the whole flow act on stale (empty) state.
#[hook]
pub fn use_receipt(api_client: &ApiClient, lang: Lang) -> UseReceiptResult {
    let phase = use_state(|| ReceiptPhase::Idle);
    let file = use_state(|| None::<File>);
    let receipt_path = use_state(|| None::<String>);
    let drafts = use_state(Vec::<DraftRow>::new);
    let error = use_state(|| None::<ReceiptError>);

    let reset = {
        let phase = phase.clone();
        let file = file.clone();
        let receipt_path = receipt_path.clone();
        let drafts = drafts.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            phase.set(ReceiptPhase::Idle);
            file.set(None);
            receipt_path.set(None);
            drafts.set(Vec::new());
            error.set(None);
        })
    };

    let set_file = {
        let file = file.clone();
        let error = error.clone();
        use_callback((), move |next: Option<File>, _| {
            file.set(next);
            error.set(None);
        })
    };

    let upload = {
        let api_client = api_client.clone();
        let phase = phase.clone();
        let receipt_path = receipt_path.clone();
        let drafts = drafts.clone();
        let error = error.clone();

        use_callback((*file).clone(), move |_, file| {
            let api_client = api_client.clone();
            let phase = phase.clone();
            let receipt_path = receipt_path.clone();
            let drafts = drafts.clone();
            let error = error.clone();

            error.set(None);

            let Some(selected) = file.clone() else {
                error.set(Some(ReceiptError::MissingFile));
                return;
            };

            spawn_local(async move {
                phase.set(ReceiptPhase::Uploading);

                match api_client.process_receipt(&selected).await {
                    Ok(response) => {
                        drafts.set(
                            response
                                .expenses_preview
                                .iter()
                                .map(DraftRow::from_preview)
                                .collect(),
                        );
                        receipt_path.set(Some(response.receipt_path));
                        phase.set(ReceiptPhase::Previewing);
                    }
                    Err(e) => {
                        Logger::error("use_receipt", &format!("Receipt processing failed: {}", e));
                        error.set(Some(ReceiptError::Api(e.to_string())));
                        phase.set(ReceiptPhase::Idle);
                    }
                }
            });
        })
    };

    let update_row = {
        let drafts = drafts.clone();
        use_callback(
            ((*drafts).clone(), lang),
            move |(index, patch): (usize, DraftPatch), (rows, lang)| {
                let mut rows = rows.clone();
                let Some(row) = rows.get_mut(index) else {
                    return;
                };
                if apply_patch(row, patch).is_err() {
                    gloo::dialogs::alert(&translate(*lang, "receipt_invalid_date"));
                }
                drafts.set(rows);
            },
        )
    };

    let save = {
        let api_client = api_client.clone();
        let phase = phase.clone();
        let error = error.clone();
        let reset = reset.clone();

        use_callback(
            ((*phase).clone(), (*receipt_path).clone(), (*drafts).clone()),
            move |_, deps| {
                let (current_phase, path, rows) = deps.clone();
                let api_client = api_client.clone();
                let phase = phase.clone();
                let error = error.clone();
                let reset = reset.clone();

                if !current_phase.accepts_save() {
                    return;
                }
                let Some(path) = path else {
                    return;
                };
                if rows.is_empty() {
                    return;
                }

                spawn_local(async move {
                    error.set(None);
                    phase.set(ReceiptPhase::Saving);

                    let request = ConfirmReceiptRequest {
                        receipt_path: path,
                        expenses: rows.iter().map(DraftRow::to_new_expense).collect(),
                    };

                    match api_client.confirm_receipt(&request).await {
                        Ok(response) => {
                            phase.set(ReceiptPhase::Saved {
                                created: response.expenses_created.len(),
                            });

                            // Show the created-count confirmation briefly, then
                            // drop back to a clean Idle form.
                            spawn_local(async move {
                                gloo::timers::future::TimeoutFuture::new(2_000).await;
                                reset.emit(());
                            });
                        }
                        Err(e) => {
                            error.set(Some(ReceiptError::Api(e.to_string())));
                            phase.set(ReceiptPhase::Previewing);
                        }
                    }
                });
            },
        )
    };

    let discard = {
        let reset = reset.clone();
        use_callback(lang, move |_, lang| {
            let confirmed = gloo::dialogs::confirm(&translate(*lang, "receipt_discard_confirm"));
            if confirmed {
                reset.emit(());
            }
        })
    };

    let state = ReceiptState {
        phase: (*phase).clone(),
        file: (*file).clone(),
        receipt_path: (*receipt_path).clone(),
        drafts: (*drafts).clone(),
        error: (*error).clone(),
    };

    let actions = UseReceiptActions {
        set_file,
        upload,
        update_row,
        save,
        discard,
    };

    UseReceiptResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview(date: Option<&str>) -> ExpensePreview {
        ExpensePreview {
            amount: 9.99,
            currency: "cad".to_string(),
            description: " Milk ".to_string(),
            category: "".to_string(),
            expense_date: date.map(|d| d.to_string()),
        }
    }

    #[test]
    fn test_draft_row_seeds_from_preview() {
        let row = DraftRow::from_preview(&preview(Some("2024-06-10")));
        assert_eq!(row.amount_input, "9.99");
        assert_eq!(row.date.display_value(), "10/06/2024");
    }

    #[test]
    fn test_normalization_uppercases_and_defaults() {
        let row = DraftRow::from_preview(&preview(None));
        let payload = row.to_new_expense();
        assert_eq!(payload.currency, "CAD");
        assert_eq!(payload.description, "Milk");
        assert_eq!(payload.category, "OTHER");
        assert_eq!(payload.amount, 9.99);
        assert_eq!(payload.expense_date, None);
    }

    #[test]
    fn test_normalization_coerces_bad_amount_to_zero() {
        let mut row = DraftRow::from_preview(&preview(None));
        row.amount_input = "not-a-number".to_string();
        assert_eq!(row.to_new_expense().amount, 0.0);
    }

    #[test]
    fn test_resolved_date_reaches_the_payload() {
        let mut row = DraftRow::from_preview(&preview(None));
        row.date = row.date.keystroke("25122024");
        row.date = row.date.commit().unwrap();
        assert_eq!(row.to_new_expense().expense_date, Some("2024-12-25".to_string()));
    }

    #[test]
    fn test_blank_currency_defaults_to_cad() {
        let mut row = DraftRow::from_preview(&preview(None));
        row.currency = "  ".to_string();
        assert_eq!(row.to_new_expense().currency, "CAD");
    }

    #[test]
    fn test_apply_patch_edits_the_target_row() {
        let mut rows = vec![
            DraftRow::from_preview(&preview(None)),
            DraftRow::from_preview(&preview(None)),
        ];

        apply_patch(&mut rows[1], DraftPatch::Description("Bread".to_string())).unwrap();
        apply_patch(&mut rows[1], DraftPatch::Amount("3.50".to_string())).unwrap();

        assert_eq!(rows[1].description, "Bread");
        assert_eq!(rows[1].amount_input, "3.50");
        // The untouched row is unaffected.
        assert_eq!(rows[0].description, " Milk ");
    }

    #[test]
    fn test_apply_patch_formats_date_keystrokes() {
        let mut row = DraftRow::from_preview(&preview(None));
        apply_patch(&mut row, DraftPatch::DateInput("25122024".to_string())).unwrap();
        assert_eq!(row.date.display_value(), "25/12/2024");
    }

    #[test]
    fn test_apply_patch_reports_a_rejected_date_commit() {
        let mut row = DraftRow::from_preview(&preview(None));
        apply_patch(&mut row, DraftPatch::DateInput("31022024".to_string())).unwrap();
        assert!(apply_patch(&mut row, DraftPatch::DateCommit).is_err());
        assert_eq!(row.date, DateField::Invalid("31/02/2024".to_string()));
        assert_eq!(row.to_new_expense().expense_date, None);
    }

    #[test]
    fn test_save_is_only_legal_from_the_preview() {
        assert!(ReceiptPhase::Previewing.accepts_save());
        assert!(!ReceiptPhase::Idle.accepts_save());
        assert!(!ReceiptPhase::Uploading.accepts_save());
        assert!(!ReceiptPhase::Saving.accepts_save());
        assert!(!ReceiptPhase::Saved { created: 2 }.accepts_save());
    }
}
