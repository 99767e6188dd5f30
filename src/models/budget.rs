//! Budget-level figures for a month
//!
//! These come from the budget metadata source. The forecast consumes a
//! [`MonthTotal`]; a [`BudgetMonth`] is the on-disk shape it is read from.

use serde::{Deserialize, Serialize};

use super::category::{CategoryBudget, CategoryId};
use super::money::Money;
use super::month::MonthKey;

/// Aggregate activity, balance and budgeted amount for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotal {
    /// Signed activity (negative means spending)
    pub total_activity: Money,
    pub total_balance: Money,
    pub total_budgeted: Money,
}

impl MonthTotal {
    /// Totals with the balance derived as `budgeted + activity`
    pub fn new(total_budgeted: Money, total_activity: Money) -> Self {
        Self {
            total_activity,
            total_balance: total_budgeted + total_activity,
            total_budgeted,
        }
    }

    /// Sum the figures of every category
    pub fn from_categories(categories: &[CategoryBudget]) -> Self {
        categories.iter().fold(Self::default(), |mut total, c| {
            total.total_activity += c.activity;
            total.total_balance += c.balance;
            total.total_budgeted += c.budgeted;
            total
        })
    }

    /// Budget left after this month's activity
    pub fn remaining_budget(&self) -> Money {
        self.total_budgeted + self.total_activity
    }

    /// Spent magnitude (positive when the month had net outflow)
    pub fn spent(&self) -> Money {
        -self.total_activity
    }
}

/// Budget metadata for one month as read from a budget file
///
/// Explicit totals take precedence; any total left out is summed from
/// `categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetMonth {
    pub month: MonthKey,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_activity: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_balance: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_budgeted: Option<Money>,

    #[serde(default)]
    pub categories: Vec<CategoryBudget>,
}

impl BudgetMonth {
    pub fn new(month: MonthKey, categories: Vec<CategoryBudget>) -> Self {
        Self {
            month,
            total_activity: None,
            total_balance: None,
            total_budgeted: None,
            categories,
        }
    }

    /// Month with explicit totals and no category breakdown
    pub fn with_totals(month: MonthKey, total: MonthTotal) -> Self {
        Self {
            month,
            total_activity: Some(total.total_activity),
            total_balance: Some(total.total_balance),
            total_budgeted: Some(total.total_budgeted),
            categories: Vec::new(),
        }
    }

    /// Resolve the month's totals
    pub fn total(&self) -> MonthTotal {
        let summed = MonthTotal::from_categories(&self.categories);
        let total_budgeted = self.total_budgeted.unwrap_or(summed.total_budgeted);
        let total_activity = self.total_activity.unwrap_or(summed.total_activity);

        let total_balance = match self.total_balance {
            Some(balance) => balance,
            None if !self.categories.is_empty() => summed.total_balance,
            None => total_budgeted + total_activity,
        };

        MonthTotal {
            total_activity,
            total_balance,
            total_budgeted,
        }
    }

    pub fn category(&self, id: &CategoryId) -> Option<&CategoryBudget> {
        self.categories.iter().find(|c| &c.category_id == id)
    }
}
