use yew::prelude::*;

use crate::components::budget_panel::BudgetPanel;
use crate::hooks::use_expenses::{total_amount, use_expenses, UseExpensesResult};
use crate::services::api::ApiClient;
use crate::services::date_utils::{filter_by_period, local_today, to_display_date, Period};
use crate::services::i18n::use_language;

/// Expense browser: the full list loads once per refresh, period tabs
/// filter it client-side, and the Budget tab swaps in the budget panel.
#[function_component(ExpensesTabs)]
pub fn expenses_tabs() -> Html {
    let i18n = use_language();
    let api_client = ApiClient::new();
    let UseExpensesResult { state, actions } = use_expenses(&api_client);

    let filtered = filter_by_period(&state.expenses, state.period, local_today());
    let total = total_amount(&filtered);

    let refresh = {
        let refresh = actions.refresh.clone();
        Callback::from(move |_| refresh.emit(()))
    };

    let period_tab = |period: Period, key: &str| {
        let set_period = actions.set_period.clone();
        let class = if state.period == period { "tab active" } else { "tab" };
        let onclick = Callback::from(move |_| set_period.emit(period));
        html! {
            <button {class} {onclick}>{ i18n.t(key) }</button>
        }
    };

    html! {
        <div class="card">
            <div class="row">
                <h2>{ i18n.t("expenses_title") }</h2>
                <button class="button secondary" onclick={refresh} disabled={state.loading}>
                    { if state.loading { i18n.t("expenses_loading") } else { i18n.t("expenses_refresh") } }
                </button>
            </div>

            <div class="tabs">
                { period_tab(Period::Day, "expenses_period_day") }
                { period_tab(Period::Week, "expenses_period_week") }
                { period_tab(Period::Month, "expenses_period_month") }
                { period_tab(Period::Budget, "expenses_period_budget") }
            </div>

            {if let Some(message) = state.error.as_ref() {
                html! { <div class="error">{ message }</div> }
            } else {
                html! {}
            }}

            {if state.period == Period::Budget {
                html! { <BudgetPanel expenses={state.expenses.clone()} /> }
            } else {
                html! {
                    <>
                        <div class="muted">
                            { i18n.t_with("expenses_total", &[("total", format!("{:.2}", total))]) }
                        </div>

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
                                    {for filtered.iter().map(|expense| {
                                        html! {
                                            <tr key={expense.id}>
                                                <td>{ to_display_date(&expense.expense_date) }</td>
                                                <td>{ &expense.description }</td>
                                                <td>{ expense.category.as_str() }</td>
                                                <td>{ format!("{:.2}", expense.amount) }</td>
                                                <td>{ expense.currency.as_str() }</td>
                                            </tr>
                                        }
                                    })}
                                </tbody>
                            </table>
                        </div>
                    </>
                }
            }}
        </div>
    }
}
