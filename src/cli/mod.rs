//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod daily;
pub mod forecast;
pub mod project;
pub mod summary;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::error::{ForecastError, ForecastResult};
use crate::export::{write_json, write_yaml, ExportFormat};
use crate::import::read_transactions_file;
use crate::models::Transaction;

pub use config::{handle_config_command, ConfigArgs};
pub use daily::{handle_daily_command, DailyArgs};
pub use forecast::{handle_forecast_command, ForecastArgs};
pub use project::{handle_project_command, ProjectArgs};
pub use summary::{handle_summary_command, SummaryArgs};

/// Settings and global flags shared by every command
#[derive(Debug, Clone)]
pub struct CliContext {
    pub settings: Settings,
    /// Abort on the first rejected transaction instead of skipping it
    pub strict: bool,
}

impl CliContext {
    pub fn new(settings: Settings, strict_flag: bool) -> Self {
        let strict = strict_flag || settings.strict_import;
        Self { settings, strict }
    }
}

/// Output options shared by the report commands
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Terminal)]
    pub format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Read the transactions file, honouring strict mode
pub(crate) fn load_transactions(ctx: &CliContext, input: &Path) -> ForecastResult<Vec<Transaction>> {
    let outcome = read_transactions_file(input)?;

    if ctx.strict {
        return outcome.into_strict();
    }

    if !outcome.is_clean() {
        eprintln!(
            "Skipped {} invalid transaction(s); use --strict to fail instead.",
            outcome.rejected.len()
        );
    }
    Ok(outcome.transactions)
}

fn open_output(path: Option<&Path>) -> ForecastResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ForecastError::Export(format!("Cannot create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
    }
}

/// Render `report` in the requested format
pub(crate) fn emit_report<T, F, C>(
    report: &T,
    output: &OutputArgs,
    terminal: F,
    csv: C,
) -> ForecastResult<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
    C: FnOnce(&T, &mut Box<dyn Write>) -> ForecastResult<()>,
{
    let mut writer = open_output(output.output.as_deref())?;

    match output.format {
        ExportFormat::Terminal => writer
            .write_all(terminal(report).as_bytes())
            .map_err(|e| ForecastError::Export(e.to_string()))?,
        ExportFormat::Json => write_json(report, &mut writer)?,
        ExportFormat::Yaml => write_yaml(report, &mut writer)?,
        ExportFormat::Csv => csv(report, &mut writer)?,
    }

    writer
        .flush()
        .map_err(|e| ForecastError::Export(e.to_string()))?;

    if let Some(path) = &output.output {
        info!(path = %path.display(), format = %output.format, "report written");
        eprintln!("Report written to {}", path.display());
    }
    Ok(())
}
