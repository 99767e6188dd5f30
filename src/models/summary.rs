//! Month summaries
//!
//! A [`MonthSummary`] groups one month's transactions with their
//! per-category usage. [`MonthSummaries`] is the accumulator the month
//! aggregation folds into, keyed and iterated by month.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::services::CategoryUsageAggregator;

use super::category::CategoryKey;
use super::money::Money;
use super::month::MonthKey;
use super::transaction::Transaction;
use super::usage::CategoryUsage;

/// Aggregated view of one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: MonthKey,

    /// Whether `month` was the reference month when this summary was created
    pub is_current_month: bool,

    /// One entry per distinct category key, in first-seen order
    pub category_usages: Vec<CategoryUsage>,

    /// Transactions in processing order
    pub overall_transactions: Vec<Transaction>,
}

impl MonthSummary {
    /// Signed sum of all transactions in the month
    pub fn total_activity(&self) -> Money {
        self.overall_transactions.iter().map(|t| t.amount).sum()
    }

    /// Sum of negative amounts (spending), still negative
    pub fn total_outflow(&self) -> Money {
        self.overall_transactions
            .iter()
            .filter(|t| t.is_outflow())
            .map(|t| t.amount)
            .sum()
    }

    /// Sum of positive amounts
    pub fn total_inflow(&self) -> Money {
        self.overall_transactions
            .iter()
            .filter(|t| t.is_inflow())
            .map(|t| t.amount)
            .sum()
    }

    pub fn transaction_count(&self) -> usize {
        self.overall_transactions.len()
    }

    pub fn usage(&self, category: &CategoryKey) -> Option<&CategoryUsage> {
        self.category_usages.iter().find(|u| &u.category == category)
    }

    /// Fold another summary of the same month into this one
    ///
    /// Usages are merged by category key and the other summary's transactions
    /// are appended after this one's.
    pub fn absorb(&mut self, other: MonthSummary) {
        debug_assert_eq!(self.month, other.month);

        let usages = std::mem::take(&mut self.category_usages);
        self.category_usages = CategoryUsageAggregator::merge(usages, &other.category_usages);
        self.overall_transactions.extend(other.overall_transactions);
    }
}

/// All month summaries of an aggregation pass, ordered by month
///
/// Serialized as a sequence of summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<MonthSummary>", from = "Vec<MonthSummary>")]
pub struct MonthSummaries(BTreeMap<MonthKey, MonthSummary>);

impl MonthSummaries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, month: &MonthKey) -> Option<&MonthSummary> {
        self.0.get(month)
    }

    pub(crate) fn get_mut(&mut self, month: &MonthKey) -> Option<&mut MonthSummary> {
        self.0.get_mut(month)
    }

    pub(crate) fn insert(&mut self, summary: MonthSummary) {
        self.0.insert(summary.month, summary);
    }

    pub fn contains(&self, month: &MonthKey) -> bool {
        self.0.contains_key(month)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Summaries in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &MonthSummary> {
        self.0.values()
    }

    pub fn months(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.0.keys().copied()
    }

    /// The summary flagged as the current month, if any
    pub fn current(&self) -> Option<&MonthSummary> {
        self.iter().find(|s| s.is_current_month)
    }

    pub fn into_vec(self) -> Vec<MonthSummary> {
        self.0.into_values().collect()
    }

    /// Union on month key
    ///
    /// Months present on both sides are combined with [`MonthSummary::absorb`];
    /// `self`'s current-month flag is kept.
    pub fn merge(mut self, other: MonthSummaries) -> Self {
        for (month, summary) in other.0 {
            match self.0.get_mut(&month) {
                Some(existing) => existing.absorb(summary),
                None => {
                    self.0.insert(month, summary);
                }
            }
        }
        self
    }
}

impl From<MonthSummaries> for Vec<MonthSummary> {
    fn from(summaries: MonthSummaries) -> Self {
        summaries.into_vec()
    }
}

impl From<Vec<MonthSummary>> for MonthSummaries {
    fn from(summaries: Vec<MonthSummary>) -> Self {
        summaries
            .into_iter()
            .map(|summary| {
                let mut single = MonthSummaries::new();
                single.insert(summary);
                single
            })
            .fold(MonthSummaries::new(), MonthSummaries::merge)
    }
}

impl<'a> IntoIterator for &'a MonthSummaries {
    type Item = &'a MonthSummary;
    type IntoIter = std::collections::btree_map::Values<'a, MonthKey, MonthSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}
