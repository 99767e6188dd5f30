//! Month Summary Report
//!
//! One row per aggregated month with its category usage breakdown.

use serde::Serialize;
use std::io::Write;
use tabled::{settings::Style, Table, Tabled};

use crate::display::{format_money, separator};
use crate::error::{ForecastError, ForecastResult};
use crate::models::{CategoryUsage, Money, MonthKey, MonthSummaries, MonthSummary};

/// Figures for one month
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummaryRow {
    pub month: MonthKey,
    pub is_current_month: bool,
    pub transaction_count: usize,
    pub total_inflow: Money,
    pub total_outflow: Money,
    pub total_activity: Money,
    /// Usage per category, in first-seen order
    pub categories: Vec<CategoryUsage>,
}

impl From<&MonthSummary> for MonthSummaryRow {
    fn from(summary: &MonthSummary) -> Self {
        Self {
            month: summary.month,
            is_current_month: summary.is_current_month,
            transaction_count: summary.transaction_count(),
            total_inflow: summary.total_inflow(),
            total_outflow: summary.total_outflow(),
            total_activity: summary.total_activity(),
            categories: summary.category_usages.clone(),
        }
    }
}

/// Month Summary Report
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummaryReport {
    /// Months in chronological order
    pub months: Vec<MonthSummaryRow>,
    pub total_activity: Money,
    pub total_transactions: usize,
}

#[derive(Tabled)]
struct MonthTableRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Txns")]
    transactions: usize,
    #[tabled(rename = "Categories")]
    categories: usize,
    #[tabled(rename = "Inflow")]
    inflow: String,
    #[tabled(rename = "Outflow")]
    outflow: String,
    #[tabled(rename = "Activity")]
    activity: String,
}

#[derive(Serialize)]
struct CategoryCsvRow<'a> {
    month: MonthKey,
    is_current_month: bool,
    category: &'a str,
    total_activity: Money,
    transaction_count: usize,
}

impl MonthSummaryReport {
    /// Build the report from aggregated summaries
    pub fn generate(summaries: &MonthSummaries) -> Self {
        let months: Vec<MonthSummaryRow> = summaries.iter().map(MonthSummaryRow::from).collect();

        Self {
            total_activity: months.iter().map(|m| m.total_activity).sum(),
            total_transactions: months.iter().map(|m| m.transaction_count).sum(),
            months,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Month Summary\n");
        output.push_str(&separator(60));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No transactions.\n");
            return output;
        }

        let rows = self.months.iter().map(|m| MonthTableRow {
            month: if m.is_current_month {
                format!("{} *", m.month)
            } else {
                m.month.to_string()
            },
            transactions: m.transaction_count,
            categories: m.categories.len(),
            inflow: format_money(m.total_inflow, symbol),
            outflow: format_money(m.total_outflow, symbol),
            activity: format_money(m.total_activity, symbol),
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');

        for month in &self.months {
            output.push_str(&format!("\n{}\n", month.month));
            for usage in &month.categories {
                output.push_str(&format!(
                    "  {:<30} {:>14} {:>6}\n",
                    usage.category.to_string(),
                    format_money(usage.total_activity, symbol),
                    usage.transaction_count
                ));
            }
        }

        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>14} {:>6}\n",
            "TOTAL",
            format_money(self.total_activity, symbol),
            self.total_transactions
        ));
        if self.months.iter().any(|m| m.is_current_month) {
            output.push_str("* current month\n");
        }

        output
    }

    /// Export one CSV row per month and category, amounts in minor units
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ForecastResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        if self.months.is_empty() {
            csv_writer
                .write_record([
                    "month",
                    "is_current_month",
                    "category",
                    "total_activity",
                    "transaction_count",
                ])
                .map_err(|e| ForecastError::Export(e.to_string()))?;
        }

        for month in &self.months {
            for usage in &month.categories {
                csv_writer
                    .serialize(CategoryCsvRow {
                        month: month.month,
                        is_current_month: month.is_current_month,
                        category: usage.category.as_str(),
                        total_activity: usage.total_activity,
                        transaction_count: usage.transaction_count,
                    })
                    .map_err(|e| ForecastError::Export(e.to_string()))?;
            }
        }

        csv_writer
            .flush()
            .map_err(|e| ForecastError::Export(e.to_string()))?;
        Ok(())
    }
}
