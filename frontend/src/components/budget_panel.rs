use shared::{Category, Expense};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::progress_ring::ProgressRing;
use crate::hooks::use_budgets::{use_budgets, UseBudgetsResult};
use crate::hooks::use_expenses::{expenses_in_month, spent_by_category};
use crate::services::api::ApiClient;
use crate::services::date_utils::{local_today, month_options};
use crate::services::i18n::use_language;
use crate::services::storage;

#[derive(Properties, PartialEq)]
pub struct BudgetPanelProps {
    /// The already-loaded expense list; the panel buckets the selected
    /// month's slice by category for the progress rings.
    pub expenses: Vec<Expense>,
}

#[function_component(BudgetPanel)]
pub fn budget_panel(props: &BudgetPanelProps) -> Html {
    let i18n = use_language();
    let api_client = ApiClient::new();
    let UseBudgetsResult { state, actions } = use_budgets(&api_client);

    let spent = spent_by_category(&expenses_in_month(&props.expenses, &state.month));

    // The entry currency is locked to the account default; there is no
    // currency input, only this notice.
    let locked_currency = storage::load_user_profile().map(|p| p.default_currency);

    let on_month_change = {
        let set_month = actions.set_month.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set_month.emit(select.value());
        })
    };

    let on_category_change = {
        let set_category = actions.set_category.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set_category.emit(select.value());
        })
    };

    let on_amount_input = {
        let set_amount_input = actions.set_amount_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_amount_input.emit(input.value());
        })
    };

    let onsubmit = {
        let create = actions.create.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            create.emit(());
        })
    };

    let refresh = {
        let refresh = actions.refresh.clone();
        Callback::from(move |_| refresh.emit(()))
    };

    let field_error = |key: Option<&'static str>| match key {
        Some(key) => html! { <div class="error">{ i18n.t(key) }</div> },
        None => html! {},
    };

    html! {
        <div class="section">
            {if let Some(currency) = locked_currency {
                html! {
                    <div class="muted">
                        { i18n.t_with("budget_currency_locked", &[("currency", currency.to_string())]) }
                    </div>
                }
            } else {
                html! {}
            }}

            <form class="form" {onsubmit}>
                <label class="label">
                    { i18n.t("budget_month") }
                    <select class="input" onchange={on_month_change}>
                        {for month_options(local_today()).into_iter().map(|option| {
                            html! {
                                <option value={option.clone()} selected={option == state.month}>
                                    { option.clone() }
                                </option>
                            }
                        })}
                    </select>
                </label>
                { field_error(state.field_errors.month) }

                <label class="label">
                    { i18n.t("budget_category") }
                    <select class="input" onchange={on_category_change}>
                        <option value="" selected={state.category.is_empty()}></option>
                        {for Category::ALL.iter().map(|category| {
                            html! {
                                <option
                                    value={category.as_str()}
                                    selected={state.category == category.as_str()}
                                >
                                    { category.as_str() }
                                </option>
                            }
                        })}
                    </select>
                </label>
                { field_error(state.field_errors.category) }

                <label class="label">
                    { i18n.t("budget_amount") }
                    <input
                        class="input"
                        type="number"
                        step="0.01"
                        min="0.01"
                        value={state.amount_input.clone()}
                        oninput={on_amount_input}
                    />
                </label>
                { field_error(state.field_errors.amount) }

                <div class="row">
                    <button class="button" type="submit" disabled={state.saving}>
                        { if state.saving { i18n.t("budget_saving") } else { i18n.t("budget_save") } }
                    </button>
                    <button class="button secondary" type="button" onclick={refresh} disabled={state.loading}>
                        { if state.loading { i18n.t("budget_loading") } else { i18n.t("budget_refresh") } }
                    </button>
                </div>
            </form>

            {if let Some(message) = state.error.as_ref() {
                html! { <div class="error">{ message }</div> }
            } else {
                html! {}
            }}

            {if state.budgets.is_empty() && !state.loading {
                html! { <div class="muted">{ i18n.t("budget_empty") }</div> }
            } else {
                html! {
                    <div class="budget-grid">
                        {for state.budgets.iter().map(|budget| {
                            let spent_amount = spent.get(&budget.category).copied().unwrap_or(0.0);
                            let percent = budget.progress_percent(spent_amount);
                            let delete = {
                                let delete = actions.delete.clone();
                                let id = budget.id;
                                Callback::from(move |_| delete.emit(id))
                            };

                            html! {
                                <div class="budget-card" key={budget.id}>
                                    <ProgressRing
                                        percent={percent}
                                        label={budget.category.as_str().to_string()}
                                    />
                                    <div>{ format!("{:.2}", budget.amount) }</div>
                                    <button class="button secondary" onclick={delete}>
                                        { i18n.t("budget_delete") }
                                    </button>
                                </div>
                            }
                        })}
                    </div>
                }
            }}
        </div>
    }
}
