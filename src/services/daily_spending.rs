//! Daily spending projection
//!
//! Buckets one month's transactions by day of month for charting.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Money, MonthlySpendingDatum, SeriesDensity, Transaction};

/// Turns a month of transactions into a per-day series
#[derive(Debug, Clone, Copy, Default)]
pub struct DailySpendingProjector {
    density: SeriesDensity,
}

impl DailySpendingProjector {
    pub fn new(density: SeriesDensity) -> Self {
        Self { density }
    }

    pub fn density(&self) -> SeriesDensity {
        self.density
    }

    /// Sum amounts per day of month, ascending by day
    ///
    /// The caller passes transactions of a single month; this is not checked.
    /// A dense series covers every day of the first transaction's month,
    /// extended to the largest day seen, with zero on quiet days. A sparse
    /// series has one datum per active day. No transactions gives no data.
    pub fn project(&self, transactions: &[Transaction]) -> Vec<MonthlySpendingDatum> {
        let Some(first) = transactions.first() else {
            return Vec::new();
        };

        let mut by_day: BTreeMap<u32, Money> = BTreeMap::new();
        for transaction in transactions {
            *by_day.entry(transaction.day_of_month()).or_default() += transaction.amount;
        }

        let series: Vec<MonthlySpendingDatum> = match self.density {
            SeriesDensity::Sparse => by_day
                .into_iter()
                .map(|(day, spent)| MonthlySpendingDatum::new(day, spent))
                .collect(),
            SeriesDensity::Dense => {
                let last_seen = by_day.keys().next_back().copied().unwrap_or(0);
                let last_day = first.month().days_in_month().max(last_seen);
                (1..=last_day)
                    .map(|day| {
                        MonthlySpendingDatum::new(day, by_day.get(&day).copied().unwrap_or_default())
                    })
                    .collect()
            }
        };

        debug!(
            density = %self.density,
            days = series.len(),
            "projected daily spending"
        );
        series
    }

    /// Signed total of a series
    pub fn total(series: &[MonthlySpendingDatum]) -> Money {
        series.iter().map(|datum| datum.spent).sum()
    }
}
