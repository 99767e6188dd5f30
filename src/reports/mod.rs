//! Reports module for budget-forecast
//!
//! Provides the month summary, month overview, daily spending and balance
//! projection reports.
//! Each renders for the terminal, exports CSV, and serializes for JSON/YAML.

pub mod balance_projection;
pub mod daily_spending;
pub mod month_overview;
pub mod month_summary;

pub use balance_projection::{BalanceProjectionReport, LowPoint};
pub use daily_spending::DailySpendingReport;
pub use month_overview::{CategoryOverviewRow, MonthOverviewReport, TOTAL_ROW_KEY};
pub use month_summary::{MonthSummaryReport, MonthSummaryRow};
