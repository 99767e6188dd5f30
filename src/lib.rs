//! budget-forecast - monthly spending summaries and budget forecasts
//!
//! This library folds a flat list of dated, signed transactions into
//! per-month, per-category summaries, projects a daily spending series for
//! one month, and forecasts where the month's budget ends up at the current
//! spending pace.
//!
//! # Conventions
//!
//! Amounts are integer minor units (cents). Negative amounts are outflows,
//! so a month's activity is the signed sum of its transactions and the
//! remaining budget is `budgeted + activity`. Forecast figures are
//! fractional minor units.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Value types (money, months, transactions, summaries, forecasts)
//! - `services`: The pure aggregation and forecast core
//! - `import`: Transaction and budget file readers with validation
//! - `reports`: Month summary, month overview and daily spending reports
//! - `export`: JSON and YAML output
//! - `display`: Terminal formatting helpers
//! - `config`: Configuration and path management
//! - `cli`: Command handlers for the binary
//! - `logging`: Tracing subscriber setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_forecast::models::{MonthCalendar, MonthKey, MonthTotal, Money};
//! use budget_forecast::services::{ForecastEngine, MonthSummaryAggregator};
//!
//! let march = MonthKey::new(2024, 3).expect("valid month");
//! let summaries = MonthSummaryAggregator::new(march).aggregate(&transactions);
//! let activity = summaries.get(&march).map(|s| s.total_activity()).unwrap_or_default();
//! let total = MonthTotal::new(Money::from_cents(10000), activity);
//! let forecast = ForecastEngine::forecast(&total, &MonthCalendar::new(31, 20, true));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{ForecastError, ForecastResult};
