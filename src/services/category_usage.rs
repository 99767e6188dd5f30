//! Category usage aggregation
//!
//! Folds transactions into one [`CategoryUsage`] per category key. Missing
//! categories land in the uncategorized bucket.

use tracing::trace;

use crate::models::{CategoryUsage, Transaction};

/// Folds transactions into per-category usage totals
pub struct CategoryUsageAggregator;

impl CategoryUsageAggregator {
    /// Apply one transaction to the usage list
    ///
    /// The list is consumed and the updated list returned; callers continue
    /// with the returned value. Matching is by exact category key; a new
    /// entry is appended for a key not seen before.
    pub fn reduce(mut usages: Vec<CategoryUsage>, transaction: &Transaction) -> Vec<CategoryUsage> {
        let key = transaction.category_key();

        match usages.iter_mut().find(|usage| usage.category == key) {
            Some(usage) => usage.record(transaction),
            None => {
                trace!(category = %key, "new category usage");
                usages.push(CategoryUsage::from_transaction(transaction));
            }
        }

        usages
    }

    /// Fold a whole sequence from an empty list
    pub fn aggregate<'a, I>(transactions: I) -> Vec<CategoryUsage>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions.into_iter().fold(Vec::new(), Self::reduce)
    }

    /// Combine two usage lists by category key
    ///
    /// Entries of `left` keep their order; keys only in `right` are appended.
    pub fn merge(mut left: Vec<CategoryUsage>, right: &[CategoryUsage]) -> Vec<CategoryUsage> {
        for usage in right {
            match left.iter_mut().find(|u| u.category == usage.category) {
                Some(existing) => existing.absorb(usage),
                None => left.push(usage.clone()),
            }
        }
        left
    }
}
