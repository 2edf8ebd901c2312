use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency codes supported by the backend.
///
/// The set is closed: money-bearing records with an unknown code are a
/// decode error rather than silently coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    CAD,
    USD,
    COP,
}

impl Currency {
    /// All currencies, in the order the selects present them.
    pub const ALL: [Currency; 3] = [Currency::CAD, Currency::USD, Currency::COP];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::CAD => "CAD",
            Currency::USD => "USD",
            Currency::COP => "COP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAD" => Ok(Currency::CAD),
            "USD" => Ok(Currency::USD),
            "COP" => Ok(Currency::COP),
            other => Err(UnknownCurrency(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrency(pub String);

impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown currency code: {}", self.0)
    }
}

impl std::error::Error for UnknownCurrency {}

/// Expense classification.
///
/// Anything the backend sends outside the known set decodes to `Other`, so
/// one malformed row cannot take down a whole expense list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Food,
    Groceries,
    Transport,
    Entertainment,
    Health,
    Utilities,
    Rent,
    #[serde(other)]
    Other,
}

impl Category {
    /// All categories, in the order the budget select presents them.
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Groceries,
        Category::Transport,
        Category::Entertainment,
        Category::Health,
        Category::Utilities,
        Category::Rent,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "FOOD",
            Category::Groceries => "GROCERIES",
            Category::Transport => "TRANSPORT",
            Category::Entertainment => "ENTERTAINMENT",
            Category::Health => "HEALTH",
            Category::Utilities => "UTILITIES",
            Category::Rent => "RENT",
            Category::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    /// Free-text category input (receipt previews) maps onto the closed
    /// set, with anything unrecognized falling back to `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "FOOD" => Category::Food,
            "GROCERIES" => Category::Groceries,
            "TRANSPORT" => Category::Transport,
            "ENTERTAINMENT" => Category::Entertainment,
            "HEALTH" => Category::Health,
            "UTILITIES" => Category::Utilities,
            "RENT" => Category::Rent,
            _ => Category::Other,
        })
    }
}

/// A persisted expense as the backend returns it.
///
/// Read-only in the browser UI; created by receipt confirmation or other
/// entry paths the backend owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub currency: Currency,
    pub description: String,
    pub category: Category,
    /// Bare calendar date, `YYYY-MM-DD`, no time component.
    pub expense_date: String,
}

/// A monthly per-category budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    /// Year-month key, `YYYY-MM`.
    pub month: String,
    pub category: Category,
    /// Amount in the owning user's default currency.
    pub amount: f64,
}

impl Budget {
    /// Spent-vs-budget percentage for display, clamped to `[0, 100]`.
    pub fn progress_percent(&self, spent: f64) -> f64 {
        progress_percent(spent, self.amount)
    }
}

/// Spent-vs-budget percentage clamped to `[0, 100]`; 0 when the budget
/// amount is not positive, so overspend never renders past the ring and a
/// zero budget never divides.
pub fn progress_percent(spent: f64, budget_amount: f64) -> f64 {
    if budget_amount <= 0.0 {
        return 0.0;
    }
    (spent / budget_amount * 100.0).clamp(0.0, 100.0)
}

/// The signed-in user, as cached client-side for the budget panel's
/// currency lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub default_currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub default_currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBudgetRequest {
    pub month: String,
    pub category: Category,
    pub amount: f64,
}

/// One extracted line item in a receipt preview.
///
/// Currency and category arrive as loose strings: this is OCR output the
/// user is about to edit, not a validated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensePreview {
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub category: String,
    pub expense_date: Option<String>,
}

/// Response from uploading a receipt image for extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptProcessResponse {
    pub receipt_path: String,
    pub expenses_preview: Vec<ExpensePreview>,
}

/// A normalized line item ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub category: String,
    /// `YYYY-MM-DD`, or `None` when the date field was left unset.
    pub expense_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmReceiptRequest {
    pub receipt_path: String,
    pub expenses: Vec<NewExpense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmReceiptResponse {
    pub expenses_created: Vec<Expense>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_wire_form() {
        assert_eq!(serde_json::to_string(&Currency::CAD).unwrap(), "\"CAD\"");
        let parsed: Currency = serde_json::from_str("\"COP\"").unwrap();
        assert_eq!(parsed, Currency::COP);
    }

    #[test]
    fn test_unknown_currency_is_a_decode_error() {
        let result: Result<Currency, _> = serde_json::from_str("\"EUR\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_currency_from_str_is_case_insensitive() {
        assert_eq!("cad".parse::<Currency>().unwrap(), Currency::CAD);
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::USD);
        assert!("php".parse::<Currency>().is_err());
    }

    #[test]
    fn test_category_wire_form() {
        assert_eq!(serde_json::to_string(&Category::Food).unwrap(), "\"FOOD\"");
        assert_eq!(serde_json::to_string(&Category::Other).unwrap(), "\"OTHER\"");
        let parsed: Category = serde_json::from_str("\"UTILITIES\"").unwrap();
        assert_eq!(parsed, Category::Utilities);
    }

    #[test]
    fn test_unknown_category_decodes_to_other() {
        let parsed: Category = serde_json::from_str("\"CRYPTO\"").unwrap();
        assert_eq!(parsed, Category::Other);
    }

    #[test]
    fn test_category_from_str_falls_back_to_other() {
        assert_eq!("rent".parse::<Category>().unwrap(), Category::Rent);
        assert_eq!(" Groceries ".parse::<Category>().unwrap(), Category::Groceries);
        assert_eq!("whatever".parse::<Category>().unwrap(), Category::Other);
    }

    #[test]
    fn test_expense_round_trip() {
        let expense = Expense {
            id: 42,
            amount: 12.5,
            currency: Currency::USD,
            description: "Lunch".to_string(),
            category: Category::Food,
            expense_date: "2024-06-10".to_string(),
        };

        let json = serde_json::to_string(&expense).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn test_progress_percent_clamps_overspend() {
        assert_eq!(progress_percent(150.0, 100.0), 100.0);
        assert_eq!(progress_percent(50.0, 100.0), 50.0);
    }

    #[test]
    fn test_progress_percent_handles_zero_budget() {
        assert_eq!(progress_percent(150.0, 0.0), 0.0);
        assert_eq!(progress_percent(10.0, -5.0), 0.0);
    }

    #[test]
    fn test_budget_progress_percent() {
        let budget = Budget {
            id: 1,
            month: "2024-06".to_string(),
            category: Category::Groceries,
            amount: 200.0,
        };
        assert_eq!(budget.progress_percent(50.0), 25.0);
        assert_eq!(budget.progress_percent(500.0), 100.0);
    }

    #[test]
    fn test_new_expense_serializes_null_date() {
        let row = NewExpense {
            amount: 3.0,
            currency: "CAD".to_string(),
            description: "Coffee".to_string(),
            category: "FOOD".to_string(),
            expense_date: None,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"expense_date\":null"));
    }
}
