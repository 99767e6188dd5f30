//! Month summary aggregation
//!
//! Folds transactions into one [`MonthSummary`] per month. The reference
//! month used for the current-month flag is fixed when the aggregator is
//! built, so a fold gives the same answer whenever it runs.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{MonthKey, MonthSummaries, MonthSummary, Transaction};
use crate::services::CategoryUsageAggregator;

/// Folds transactions into per-month summaries
#[derive(Debug, Clone, Copy)]
pub struct MonthSummaryAggregator {
    current_month: MonthKey,
}

impl MonthSummaryAggregator {
    /// Aggregator that flags `current_month` as the current month
    pub fn new(current_month: MonthKey) -> Self {
        Self { current_month }
    }

    pub fn current_month(&self) -> MonthKey {
        self.current_month
    }

    /// Apply one transaction
    ///
    /// An existing summary for the transaction's month gets its category
    /// usage updated and the transaction appended. Otherwise a summary is
    /// created from this transaction alone, and its current-month flag is
    /// set once here.
    pub fn reduce(&self, mut summaries: MonthSummaries, transaction: &Transaction) -> MonthSummaries {
        let month = transaction.month();

        match summaries.get_mut(&month) {
            Some(summary) => {
                let usages = std::mem::take(&mut summary.category_usages);
                summary.category_usages = CategoryUsageAggregator::reduce(usages, transaction);
                summary.overall_transactions.push(transaction.clone());
            }
            None => {
                let is_current_month = month == self.current_month;
                debug!(%month, is_current_month, "creating month summary");

                summaries.insert(MonthSummary {
                    month,
                    is_current_month,
                    category_usages: CategoryUsageAggregator::reduce(Vec::new(), transaction),
                    overall_transactions: vec![transaction.clone()],
                });
            }
        }

        summaries
    }

    /// Left fold over `transactions`, seeded with no summaries
    pub fn aggregate<'a, I>(&self, transactions: I) -> MonthSummaries
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let summaries = transactions
            .into_iter()
            .fold(MonthSummaries::new(), |acc, txn| self.reduce(acc, txn));

        debug!(months = summaries.len(), "aggregated month summaries");
        summaries
    }

    /// Aggregate each month on its own thread and merge the results
    ///
    /// The input is partitioned by month first, so every partition owns its
    /// accumulator. Within a month, transactions keep their input order, so
    /// the result equals [`aggregate`](Self::aggregate).
    pub fn aggregate_partitioned(&self, transactions: &[Transaction]) -> MonthSummaries {
        let partitions = partition_by_month(transactions);

        std::thread::scope(|scope| {
            let handles: Vec<_> = partitions
                .values()
                .map(|partition| scope.spawn(move || self.aggregate(partition.iter().copied())))
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(summaries) => summaries,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .fold(MonthSummaries::new(), MonthSummaries::merge)
        })
    }
}

/// Group transactions by month, keeping input order within each month
pub fn partition_by_month(transactions: &[Transaction]) -> BTreeMap<MonthKey, Vec<&Transaction>> {
    let mut partitions: BTreeMap<MonthKey, Vec<&Transaction>> = BTreeMap::new();
    for transaction in transactions {
        partitions
            .entry(transaction.month())
            .or_default()
            .push(transaction);
    }
    partitions
}
