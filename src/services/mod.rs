//! Service layer for budget-forecast
//!
//! The pure core: folds transactions into category usage and month
//! summaries, projects the daily spending series, computes forecasts, and
//! projects account balances forward. Nothing here reads the clock or
//! touches the filesystem.

pub mod balance_projection;
pub mod category_usage;
pub mod daily_spending;
pub mod forecast;
pub mod month_summary;

pub use balance_projection::BalanceProjector;
pub use category_usage::CategoryUsageAggregator;
pub use daily_spending::DailySpendingProjector;
pub use forecast::ForecastEngine;
pub use month_summary::{partition_by_month, MonthSummaryAggregator};
