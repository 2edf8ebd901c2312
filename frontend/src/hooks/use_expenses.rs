use shared::{Category, Expense};
use std::collections::HashMap;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::Period;
use crate::services::logging::Logger;

/// Sum of the filtered amounts, for the "Total: {total}" line.
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Bucket a month's expenses by category into a spent-amount map.
pub fn spent_by_category(expenses: &[Expense]) -> HashMap<Category, f64> {
    let mut spent = HashMap::new();
    for expense in expenses {
        *spent.entry(expense.category).or_insert(0.0) += expense.amount;
    }
    spent
}

/// Expenses whose storage date falls inside one `YYYY-MM` month key.
pub fn expenses_in_month(expenses: &[Expense], month: &str) -> Vec<Expense> {
    let prefix = format!("{}-", month);
    expenses
        .iter()
        .filter(|e| e.expense_date.starts_with(&prefix))
        .cloned()
        .collect()
}

#[derive(Clone, PartialEq)]
pub struct ExpensesState {
    pub expenses: Vec<Expense>,
    pub loading: bool,
    pub error: Option<String>,
    pub period: Period,
}

#[derive(Clone, PartialEq)]
pub struct UseExpensesActions {
    pub refresh: Callback<()>,
    pub set_period: Callback<Period>,
}

pub struct UseExpensesResult {
    pub state: ExpensesState,
    pub actions: UseExpensesActions,
}

/// Fetch-all-then-filter: the full list loads once per explicit refresh and
/// period tabs filter it client-side. Overlapping refreshes are not
/// deduplicated; the last response to resolve wins.
#[hook]
pub fn use_expenses(api_client: &ApiClient) -> UseExpensesResult {
    let expenses = use_state(Vec::<Expense>::new);
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);
    let period = use_state(|| Period::Day);

    let refresh = {
        let api_client = api_client.clone();
        let expenses = expenses.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let expenses = expenses.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                error.set(None);
                loading.set(true);

                match api_client.get_expenses().await {
                    Ok(data) => {
                        expenses.set(data);
                    }
                    Err(e) => {
                        Logger::error("use_expenses", &format!("Failed to fetch expenses: {}", e));
                        error.set(Some(e.to_string()));
                    }
                }

                loading.set(false);
            });
        })
    };

    let set_period = {
        let period = period.clone();
        use_callback((), move |next: Period, _| {
            period.set(next);
        })
    };

    // Load the list once on mount.
    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = ExpensesState {
        expenses: (*expenses).clone(),
        loading: *loading,
        error: (*error).clone(),
        period: *period,
    };

    let actions = UseExpensesActions { refresh, set_period };

    UseExpensesResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Currency;

    fn expense(amount: f64, category: Category, date: &str) -> Expense {
        Expense {
            id: 0,
            amount,
            currency: Currency::CAD,
            description: "Test".to_string(),
            category,
            expense_date: date.to_string(),
        }
    }

    #[test]
    fn test_total_amount_sums_filtered_list() {
        let expenses = vec![
            expense(10.0, Category::Food, "2024-06-01"),
            expense(2.5, Category::Rent, "2024-06-02"),
        ];
        assert_eq!(total_amount(&expenses), 12.5);
        assert_eq!(total_amount(&[]), 0.0);
    }

    #[test]
    fn test_spent_by_category_buckets_amounts() {
        let expenses = vec![
            expense(10.0, Category::Food, "2024-06-01"),
            expense(5.0, Category::Food, "2024-06-02"),
            expense(20.0, Category::Other, "2024-06-03"),
        ];
        let spent = spent_by_category(&expenses);
        assert_eq!(spent.get(&Category::Food), Some(&15.0));
        assert_eq!(spent.get(&Category::Other), Some(&20.0));
        assert_eq!(spent.get(&Category::Rent), None);
    }

    #[test]
    fn test_expenses_in_month_uses_key_prefix() {
        let expenses = vec![
            expense(1.0, Category::Food, "2024-06-30"),
            expense(2.0, Category::Food, "2024-07-01"),
            expense(3.0, Category::Food, "2023-06-15"),
        ];
        let june = expenses_in_month(&expenses, "2024-06");
        assert_eq!(june.len(), 1);
        assert_eq!(june[0].expense_date, "2024-06-30");
    }
}
