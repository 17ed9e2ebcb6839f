// src/domain/expenses.rs
//
// Booking expenses exist in two historical shapes: a bare number (legacy
// records) and an itemized list of expense objects. Every reader goes through
// `Expenses::total` so the reports, accounting and transactions screens can
// never disagree about what a booking cost.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expenses {
    Flat(f64),
    Itemized(Vec<ExpenseItem>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Expenses {
    /// Normalize either shape to a single total.
    pub fn total(&self) -> f64 {
        match self {
            Expenses::Flat(amount) => *amount,
            Expenses::Itemized(items) => items.iter().map(|item| item.amount).sum(),
        }
    }

    /// Validation applied before an expense write is accepted.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Expenses::Flat(amount) => {
                if *amount < 0.0 {
                    return Err("Expense amount cannot be negative".to_string());
                }
            }
            Expenses::Itemized(items) => {
                for item in items {
                    if item.amount < 0.0 {
                        return Err("Expense item amount cannot be negative".to_string());
                    }
                }
            }
        }
        Ok(())
    }
}

/// Total for an optional expenses field; absent means zero.
pub fn expense_total(expenses: Option<&Expenses>) -> f64 {
    expenses.map(Expenses::total).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_and_itemized_normalize_to_the_same_scale() {
        let itemized: Expenses = serde_json::from_str(r#"[{"amount":1000},{"amount":2500}]"#).unwrap();
        let flat: Expenses = serde_json::from_str("3000").unwrap();

        assert_eq!(itemized.total(), 3500.0);
        assert_eq!(flat.total(), 3000.0);
        assert_eq!(itemized.total() + flat.total(), 6500.0);
    }

    #[test]
    fn itemized_keeps_optional_metadata() {
        let parsed: Expenses = serde_json::from_str(
            r#"[{"amount":1200,"description":"Fuel","category":"transport","date":"2025-03-14"}]"#,
        )
        .unwrap();

        match parsed {
            Expenses::Itemized(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].description.as_deref(), Some("Fuel"));
                assert_eq!(items[0].category.as_deref(), Some("transport"));
            }
            Expenses::Flat(_) => panic!("expected itemized"),
        }
    }

    #[test]
    fn missing_expenses_count_as_zero() {
        assert_eq!(expense_total(None), 0.0);
        assert_eq!(expense_total(Some(&Expenses::Itemized(Vec::new()))), 0.0);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(Expenses::Flat(-1.0).validate().is_err());
        let items = Expenses::Itemized(vec![ExpenseItem {
            amount: -5.0,
            description: None,
            category: None,
            date: None,
        }]);
        assert!(items.validate().is_err());
        assert!(Expenses::Flat(0.0).validate().is_ok());
    }
}
