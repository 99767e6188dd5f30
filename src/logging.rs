//! Tracing setup for the binary

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive string
pub const LOG_ENV_VAR: &str = "BUDGET_FORECAST_LOG";

static TRACING_INIT: Once = Once::new();

/// Default crate level for a `-v` count
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber, writing to stderr
///
/// `BUDGET_FORECAST_LOG` takes precedence over the verbosity flags. Only the
/// first call has any effect.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "budget_forecast={}",
                level_for_verbosity(verbosity)
            ))
        });

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
