//! Balance Projection Report
//!
//! The projected running balance over the coming days, one line per change.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use tabled::{settings::Style, Table, Tabled};

use crate::display::{double_separator, format_money, truncate};
use crate::error::{ForecastError, ForecastResult};
use crate::models::{ChangeKind, DayBalance, Money, ProjectionInput};
use crate::services::BalanceProjector;

/// Lowest projected balance and the first day it is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LowPoint {
    pub date: NaiveDate,
    pub balance: Money,
}

/// Balance Projection Report
#[derive(Debug, Clone, Serialize)]
pub struct BalanceProjectionReport {
    pub today: NaiveDate,
    pub end: NaiveDate,
    pub starting_balance: Money,
    pub ending_balance: Money,
    pub lowest: Option<LowPoint>,
    /// Days with at least one change, ascending
    pub days: Vec<DayBalance>,
}

#[derive(Tabled)]
struct ChangeTableRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

#[derive(Serialize)]
struct ChangeCsvRow<'a> {
    date: NaiveDate,
    kind: ChangeKind,
    reason: &'a str,
    category: &'a str,
    amount: Money,
    balance_diff: Money,
    balance: Money,
}

impl BalanceProjectionReport {
    /// Generate the report
    pub fn generate(projector: &BalanceProjector, input: &ProjectionInput) -> Self {
        let days: Vec<DayBalance> = projector.project_input(input).into_values().collect();

        let lowest = days
            .iter()
            .map(|day| LowPoint {
                date: day.date,
                balance: day.balance,
            })
            .reduce(|low, point| if point.balance < low.balance { point } else { low });

        Self {
            today: projector.today(),
            end: projector.end(),
            starting_balance: input.initial_balance(),
            ending_balance: days.last().map(|d| d.balance).unwrap_or_default(),
            lowest,
            days,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        let money = |amount: Money| format_money(amount, symbol);

        output.push_str(&format!("Balance Projection: {} to {}\n", self.today, self.end));
        output.push_str(&double_separator(72));
        output.push('\n');

        output.push_str(&format!("{:<28} {:>16}\n", "Starting balance:", money(self.starting_balance)));
        output.push_str(&format!("{:<28} {:>16}\n", "Ending balance:", money(self.ending_balance)));
        if let Some(low) = &self.lowest {
            output.push_str(&format!(
                "{:<28} {:>16} on {}\n",
                "Lowest balance:",
                money(low.balance),
                low.date
            ));
            if low.balance.is_negative() {
                output.push_str(&format!("\nWarning: balance drops below zero by {}\n", low.date));
            }
        }
        output.push('\n');

        let rows = self.days.iter().flat_map(|day| {
            let last = day.changes.len().saturating_sub(1);
            day.changes.iter().enumerate().map(move |(idx, change)| ChangeTableRow {
                date: if idx == 0 { day.date.to_string() } else { String::new() },
                reason: truncate(&change.reason, 36),
                category: truncate(&change.category, 20),
                amount: money(change.amount),
                balance: if idx == last { money(day.balance) } else { String::new() },
            })
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');

        output
    }

    /// Export one row per change, amounts in minor units
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ForecastResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        for day in &self.days {
            for change in &day.changes {
                csv_writer
                    .serialize(ChangeCsvRow {
                        date: day.date,
                        kind: change.kind,
                        reason: &change.reason,
                        category: &change.category,
                        amount: change.amount,
                        balance_diff: day.balance_diff,
                        balance: day.balance,
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
