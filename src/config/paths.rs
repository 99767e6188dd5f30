//! Path management for budget-forecast
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_FORECAST_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/budget-forecast` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ForecastError;

/// Environment variable overriding the config directory
pub const DIR_ENV_VAR: &str = "BUDGET_FORECAST_DIR";

/// Manages all paths used by budget-forecast
#[derive(Debug, Clone)]
pub struct ForecastPaths {
    /// Base directory for configuration
    base_dir: PathBuf,
}

impl ForecastPaths {
    /// Resolve the base directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ForecastError> {
        let base_dir = if let Ok(custom) = std::env::var(DIR_ENV_VAR) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "budget-forecast")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    ForecastError::Config("Could not determine config directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create ForecastPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ForecastError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ForecastError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
