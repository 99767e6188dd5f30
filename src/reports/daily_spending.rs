//! Daily Spending Report
//!
//! The per-day series of one month, for charting.

use serde::Serialize;
use std::io::Write;

use crate::display::{format_bar, format_money, separator};
use crate::error::{ForecastError, ForecastResult};
use crate::models::{Money, MonthKey, MonthSummaries, MonthlySpendingDatum, SeriesDensity};
use crate::services::DailySpendingProjector;

const BAR_WIDTH: usize = 40;

/// Daily Spending Report
#[derive(Debug, Clone, Serialize)]
pub struct DailySpendingReport {
    pub month: MonthKey,
    pub density: SeriesDensity,
    pub series: Vec<MonthlySpendingDatum>,
    /// Signed total of the series; equals the month's activity
    pub total: Money,
}

impl DailySpendingReport {
    /// Project the series of `month`; empty when the month has no transactions
    pub fn generate(month: MonthKey, summaries: &MonthSummaries, density: SeriesDensity) -> Self {
        let series = summaries
            .get(&month)
            .map(|s| DailySpendingProjector::new(density).project(&s.overall_transactions))
            .unwrap_or_default();

        Self {
            month,
            density,
            total: DailySpendingProjector::total(&series),
            series,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Daily Spending: {}\n", self.month));
        output.push_str(&separator(60));
        output.push('\n');

        if self.series.is_empty() {
            output.push_str("No transactions in this month.\n");
            return output;
        }

        let max_spent = self
            .series
            .iter()
            .map(|d| (-d.spent).as_f64())
            .fold(0.0, f64::max);

        for datum in &self.series {
            output.push_str(&format!(
                "{:>2} {} {:>14}\n",
                datum.day_of_month,
                format_bar((-datum.spent).as_f64(), max_spent, BAR_WIDTH),
                format_money(datum.spent, symbol)
            ));
        }

        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<43} {:>14}\n",
            "TOTAL",
            format_money(self.total, symbol)
        ));

        output
    }

    /// Export `day_of_month,spent` rows, amounts in minor units
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ForecastResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        if self.series.is_empty() {
            csv_writer
                .write_record(["day_of_month", "spent"])
                .map_err(|e| ForecastError::Export(e.to_string()))?;
        }

        for datum in &self.series {
            csv_writer
                .serialize(datum)
                .map_err(|e| ForecastError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ForecastError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use crate::services::MonthSummaryAggregator;
    use chrono::NaiveDate;

    fn summaries() -> MonthSummaries {
        let txn = |day: u32, amount: i64| {
            Transaction::new(
                NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                Money::from_cents(amount),
                None,
            )
        };
        MonthSummaryAggregator::new(MonthKey::new(2024, 3).unwrap())
            .aggregate(&[txn(1, -2000), txn(15, -1000), txn(20, -500)])
    }

    #[test]
    fn test_generate_sparse() {
        let report = DailySpendingReport::generate(
            MonthKey::new(2024, 3).unwrap(),
            &summaries(),
            SeriesDensity::Sparse,
        );
        assert_eq!(report.series.len(), 3);
        assert_eq!(report.total.cents(), -3500);
    }

    #[test]
    fn test_format_terminal_dense() {
        let report = DailySpendingReport::generate(
            MonthKey::new(2024, 3).unwrap(),
            &summaries(),
            SeriesDensity::Dense,
        );
        let output = report.format_terminal("$");
        assert!(output.contains("Daily Spending: 2024-03"));
        assert!(output.contains("31 "));
        assert!(output.contains("-$35.00"));
    }

    #[test]
    fn test_missing_month_is_empty() {
        let report = DailySpendingReport::generate(
            MonthKey::new(2024, 4).unwrap(),
            &summaries(),
            SeriesDensity::Dense,
        );
        assert!(report.series.is_empty());
        assert!(report.format_terminal("$").contains("No transactions"));
    }

    #[test]
    fn test_export_csv() {
        let report = DailySpendingReport::generate(
            MonthKey::new(2024, 3).unwrap(),
            &summaries(),
            SeriesDensity::Sparse,
        );
        let mut output = Vec::new();
        report.export_csv(&mut output).unwrap();

        let csv = String::from_utf8(output).unwrap();
        assert_eq!(csv, "day_of_month,spent\n1,-2000\n15,-1000\n20,-500\n");
    }
}
