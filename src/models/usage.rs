//! Per-category usage within one month

use serde::{Deserialize, Serialize};

use super::category::CategoryKey;
use super::money::Money;
use super::transaction::Transaction;

/// Activity total and transaction count for one category in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUsage {
    pub category: CategoryKey,

    /// Signed sum of the category's transaction amounts
    pub total_activity: Money,

    pub transaction_count: usize,
}

impl CategoryUsage {
    /// Start a usage entry from a single transaction
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            category: transaction.category_key(),
            total_activity: transaction.amount,
            transaction_count: 1,
        }
    }

    /// Add one transaction to this entry
    pub fn record(&mut self, transaction: &Transaction) {
        self.total_activity += transaction.amount;
        self.transaction_count += 1;
    }

    /// Fold another entry for the same category into this one
    pub fn absorb(&mut self, other: &CategoryUsage) {
        debug_assert_eq!(self.category, other.category);
        self.total_activity += other.total_activity;
        self.transaction_count += other.transaction_count;
    }

    /// Spent magnitude (positive when the category had net outflow)
    pub fn spent(&self) -> Money {
        -self.total_activity
    }
}
