pub mod use_budgets;
pub mod use_expenses;
pub mod use_receipt;
pub mod use_session;
