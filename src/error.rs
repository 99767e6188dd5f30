//! Custom error types for budget-forecast
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The aggregation and forecast core never
//! fails; these errors come from the file, config and import boundaries.

use thiserror::Error;

use crate::models::MonthKey;

/// The main error type for budget-forecast operations
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Input values outside what the models accept
    #[error("Validation error: {0}")]
    Validation(String),

    /// A transaction row rejected at the import boundary
    #[error("Invalid transaction at row {row}: {reason}")]
    InvalidTransaction { row: usize, reason: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ForecastError {
    /// Create a "not found" error for a month missing from a budget file
    pub fn budget_month_not_found(month: MonthKey) -> Self {
        Self::NotFound {
            entity_type: "Budget month",
            identifier: month.to_string(),
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ForecastError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ForecastError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for budget-forecast operations
pub type ForecastResult<T> = Result<T, ForecastError>;
