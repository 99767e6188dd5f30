//! Configuration module for budget-forecast
//!
//! This module provides configuration management including:
//! - config directory resolution
//! - user settings persistence

pub mod paths;
pub mod settings;

pub use paths::ForecastPaths;
pub use settings::Settings;
