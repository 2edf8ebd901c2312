use shared::Currency;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_receipt::{
    use_receipt, DraftPatch, ReceiptError, ReceiptPhase, UseReceiptResult,
};
use crate::services::api::ApiClient;
use crate::services::i18n::use_language;

#[function_component(ReceiptUpload)]
pub fn receipt_upload() -> Html {
    let i18n = use_language();
    let api_client = ApiClient::new();
    let UseReceiptResult { state, actions } = use_receipt(&api_client, i18n.lang);

    let on_file_change = {
        let set_file = actions.set_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let selected = input.files().and_then(|list| list.get(0));
            set_file.emit(selected);
        })
    };

    let onsubmit = {
        let upload = actions.upload.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            upload.emit(());
        })
    };

    let save = {
        let save = actions.save.clone();
        Callback::from(move |_| save.emit(()))
    };

    let discard = {
        let discard = actions.discard.clone();
        Callback::from(move |_| discard.emit(()))
    };

    // Builds the per-cell edit callback for one row.
    let patch_row = |index: usize| {
        let update_row = actions.update_row.clone();
        move |patch: DraftPatch| update_row.emit((index, patch))
    };

    let uploading = state.phase == ReceiptPhase::Uploading;
    let saving = state.phase == ReceiptPhase::Saving;
    let show_preview = matches!(
        state.phase,
        ReceiptPhase::Previewing | ReceiptPhase::Saving | ReceiptPhase::Saved { .. }
    );

    html! {
        <div class="card">
            <h2>{ i18n.t("receipt_upload_title") }</h2>

            {if !show_preview {
                html! {
                    <form class="form" {onsubmit}>
                        <label class="label">
                            { i18n.t("receipt_upload_image_label") }
                            <input
                                class="input"
                                type="file"
                                accept="image/*,.pdf"
                                onchange={on_file_change}
                            />
                        </label>

                        <button class="button" type="submit" disabled={state.phase != ReceiptPhase::Idle}>
                            { if uploading { i18n.t("receipt_upload_processing") } else { i18n.t("receipt_upload_process") } }
                        </button>
                    </form>
                }
            } else {
                html! {}
            }}

            {match state.error.as_ref() {
                Some(ReceiptError::MissingFile) => html! {
                    <div class="error">{ i18n.t("receipt_upload_select_image_error") }</div>
                },
                Some(ReceiptError::Api(message)) => html! {
                    <div class="error">{ message }</div>
                },
                None => html! {},
            }}

            {if let ReceiptPhase::Saved { created } = &state.phase {
                html! {
                    <div class="form-message">
                        { i18n.t_with("receipt_saved_ok", &[("count", created.to_string())]) }
                    </div>
                }
            } else {
                html! {}
            }}

            {if show_preview {
                html! {
                    <>
                        <h3>{ i18n.t("receipt_preview_title") }</h3>

                        <div class="table-wrap">
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>{ i18n.t("table_date") }</th>
                                        <th>{ i18n.t("table_description") }</th>
                                        <th>{ i18n.t("table_category") }</th>
                                        <th>{ i18n.t("table_amount") }</th>
                                        <th>{ i18n.t("table_currency") }</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {for state.drafts.iter().enumerate().map(|(index, row)| {
                                        let on_date_input = {
                                            let patch = patch_row(index);
                                            Callback::from(move |e: InputEvent| {
                                                let input: HtmlInputElement = e.target_unchecked_into();
                                                patch(DraftPatch::DateInput(input.value()));
                                            })
                                        };
                                        let on_date_blur = {
                                            let patch = patch_row(index);
                                            Callback::from(move |_: FocusEvent| {
                                                patch(DraftPatch::DateCommit);
                                            })
                                        };
                                        let on_description_input = {
                                            let patch = patch_row(index);
                                            Callback::from(move |e: InputEvent| {
                                                let input: HtmlInputElement = e.target_unchecked_into();
                                                patch(DraftPatch::Description(input.value()));
                                            })
                                        };
                                        let on_category_input = {
                                            let patch = patch_row(index);
                                            Callback::from(move |e: InputEvent| {
                                                let input: HtmlInputElement = e.target_unchecked_into();
                                                patch(DraftPatch::Category(input.value()));
                                            })
                                        };
                                        let on_amount_input = {
                                            let patch = patch_row(index);
                                            Callback::from(move |e: InputEvent| {
                                                let input: HtmlInputElement = e.target_unchecked_into();
                                                patch(DraftPatch::Amount(input.value()));
                                            })
                                        };
                                        let on_currency_change = {
                                            let patch = patch_row(index);
                                            Callback::from(move |e: Event| {
                                                let select: HtmlSelectElement = e.target_unchecked_into();
                                                patch(DraftPatch::Currency(select.value()));
                                            })
                                        };

                                        html! {
                                            <tr key={index}>
                                                <td>
                                                    <input
                                                        class="input"
                                                        type="text"
                                                        placeholder="DD/MM/YYYY"
                                                        maxlength="10"
                                                        value={row.date.display_value()}
                                                        oninput={on_date_input}
                                                        onblur={on_date_blur}
                                                    />
                                                </td>
                                                <td>
                                                    <input
                                                        class="input"
                                                        type="text"
                                                        value={row.description.clone()}
                                                        oninput={on_description_input}
                                                    />
                                                </td>
                                                <td>
                                                    <input
                                                        class="input"
                                                        type="text"
                                                        value={row.category.clone()}
                                                        oninput={on_category_input}
                                                    />
                                                </td>
                                                <td>
                                                    <input
                                                        class="input"
                                                        type="number"
                                                        step="0.01"
                                                        value={row.amount_input.clone()}
                                                        oninput={on_amount_input}
                                                    />
                                                </td>
                                                <td>
                                                    <select class="input" onchange={on_currency_change}>
                                                        {for Currency::ALL.iter().map(|currency| {
                                                            html! {
                                                                <option
                                                                    value={currency.as_str()}
                                                                    selected={row.currency.eq_ignore_ascii_case(currency.as_str())}
                                                                >
                                                                    { currency.as_str() }
                                                                </option>
                                                            }
                                                        })}
                                                    </select>
                                                </td>
                                            </tr>
                                        }
                                    })}
                                </tbody>
                            </table>
                        </div>

                        <div class="row">
                            <button
                                class="button"
                                onclick={save}
                                disabled={!state.phase.accepts_save() || state.drafts.is_empty()}
                            >
                                { if saving { i18n.t("receipt_saving") } else { i18n.t("receipt_save") } }
                            </button>
                            <button class="button secondary" onclick={discard} disabled={saving}>
                                { i18n.t("receipt_discard") }
                            </button>
                        </div>
                    </>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
