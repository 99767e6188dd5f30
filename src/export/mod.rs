//! Export module for budget-forecast
//!
//! Reports render to the terminal or export as:
//! - CSV: spreadsheet-compatible rows (written by each report)
//! - JSON: machine-readable report data
//! - YAML: human-readable report data

pub mod json;
pub mod yaml;

use std::fmt;

use clap::ValueEnum;

pub use json::write_json;
pub use yaml::write_yaml;

/// Output format for report commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Plain text for the terminal
    #[default]
    Terminal,
    Json,
    Yaml,
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal => write!(f, "terminal"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
