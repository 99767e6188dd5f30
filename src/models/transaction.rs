//! Transaction model
//!
//! A validated transaction as seen by the aggregation core. Raw records are
//! checked by the import boundary before they become a [`Transaction`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{CategoryId, CategoryKey};
use super::money::Money;
use super::month::MonthKey;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date
    pub date: NaiveDate,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    /// Category ID (None if uncategorized)
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: Money, category_id: Option<CategoryId>) -> Self {
        Self {
            date,
            amount,
            category_id,
        }
    }

    /// The month this transaction belongs to
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// 1-based day of month
    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// The aggregation key, mapping a missing category to the uncategorized bucket
    pub fn category_key(&self) -> CategoryKey {
        CategoryKey::from(self.category_id.clone())
    }

    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category_key(),
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNCATEGORIZED_KEY;

    #[test]
    fn test_month_and_day() {
        let txn = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            Money::from_cents(-1000),
            None,
        );
        assert_eq!(txn.month().to_string(), "2024-03");
        assert_eq!(txn.day_of_month(), 15);
        assert!(txn.is_outflow());
        assert!(!txn.is_inflow());
    }

    #[test]
    fn test_category_key() {
        let groceries = CategoryId::new("groceries").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let txn = Transaction::new(date, Money::from_cents(-2000), Some(groceries.clone()));
        assert_eq!(txn.category_key(), CategoryKey::Category(groceries));

        let txn = Transaction::new(date, Money::from_cents(-500), None);
        assert_eq!(txn.category_key().as_str(), UNCATEGORIZED_KEY);
    }

    #[test]
    fn test_serialization() {
        let json = r#"{"date":"2024-03-01","amount":-2000,"category_id":"groceries"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.amount.cents(), -2000);
        assert_eq!(serde_json::to_string(&txn).unwrap(), json);
    }
}
