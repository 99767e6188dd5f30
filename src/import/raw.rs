//! Unvalidated transaction records
//!
//! [`RawTransaction`] is what a source file holds before validation. Only
//! validated [`Transaction`]s go on to the aggregation core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{CategoryId, Money, Transaction, MAX_AMOUNT};

/// A transaction record as read from a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// `YYYY-MM-DD`, optionally followed by a time part
    pub date: String,

    /// Integer minor units, as a JSON number or a string
    pub amount: Value,

    #[serde(default, alias = "categoryId")]
    pub category_id: Option<String>,
}

impl RawTransaction {
    pub fn new(date: impl Into<String>, amount: Value, category_id: Option<String>) -> Self {
        Self {
            date: date.into(),
            amount,
            category_id,
        }
    }

    /// Check every field and build a [`Transaction`]
    ///
    /// The error is a human-readable reason; callers attach the row number.
    pub fn validate(&self) -> Result<Transaction, String> {
        let date = parse_date(&self.date)?;
        let amount = parse_amount(&self.amount)?;
        let category_id = parse_category(self.category_id.as_deref())?;

        Ok(Transaction::new(date, amount, category_id))
    }
}

/// Parse the leading `YYYY-MM-DD` of a date or date-time string
fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    let (day_part, rest) = match value.char_indices().nth(10) {
        Some((idx, _)) => value.split_at(idx),
        None => (value, ""),
    };

    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return Err(format!("Could not parse date: '{}'", value));
    }

    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .map_err(|_| format!("Could not parse date: '{}'", value))
}

fn parse_amount(value: &Value) -> Result<Money, String> {
    let cents = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    let amount = cents
        .map(Money::from_cents)
        .ok_or_else(|| format!("Amount must be an integer number of minor units, got {}", value))?;

    if !amount.is_within_limit() {
        return Err(format!(
            "Amount {} exceeds the limit of {} minor units",
            amount.cents(),
            MAX_AMOUNT
        ));
    }
    Ok(amount)
}

/// Blank ids mean uncategorized
fn parse_category(value: Option<&str>) -> Result<Option<CategoryId>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => CategoryId::new(id).map(Some).map_err(|e| e.to_string()),
    }
}
