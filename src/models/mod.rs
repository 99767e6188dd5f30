//! Core data models
//!
//! Value types for the aggregation and forecasting pipeline: money,
//! months, transactions, category usage, month summaries, budget totals,
//! forecasts, the daily spending series and balance projections.

pub mod budget;
pub mod category;
pub mod forecast;
pub mod money;
pub mod month;
pub mod projection;
pub mod spending;
pub mod summary;
pub mod transaction;
pub mod usage;

pub use budget::{BudgetMonth, MonthTotal};
pub use category::{CategoryBudget, CategoryId, CategoryKey, UNCATEGORIZED_KEY};
pub use forecast::{MonthProgress, MonthlyForecast};
pub use money::{Money, MAX_AMOUNT};
pub use month::{MonthCalendar, MonthKey};
pub use projection::{
    AccountBalance, BalanceChange, Cadence, CategoryTarget, ChangeKind, DayBalance, GoalType,
    ProjectedCategory, ProjectionInput, ScheduledTransaction, Simulation,
};
pub use spending::{MonthlySpendingDatum, SeriesDensity};
pub use summary::{MonthSummaries, MonthSummary};
pub use transaction::Transaction;
pub use usage::CategoryUsage;
