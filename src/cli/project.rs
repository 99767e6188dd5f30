//! `project` command: daily balance projection

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;

use super::{emit_report, CliContext, OutputArgs};
use crate::error::ForecastResult;
use crate::import::read_projection_file;
use crate::reports::BalanceProjectionReport;
use crate::services::BalanceProjector;

/// Longest projection window, in days
pub const MAX_DAYS_AHEAD: i64 = 3660;

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Projection input file (JSON: accounts, scheduled, categories, simulations)
    pub input: PathBuf,

    /// Days to project past today
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(0..=MAX_DAYS_AHEAD))]
    pub days: u32,

    /// Reference date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Handle the project command
pub fn handle_project_command(ctx: &CliContext, args: ProjectArgs) -> ForecastResult<()> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let input = read_projection_file(&args.input)?;

    let projector = BalanceProjector::new(today, args.days);
    let report = BalanceProjectionReport::generate(&projector, &input);

    let symbol = ctx.settings.currency_symbol.as_str();
    emit_report(
        &report,
        &args.output,
        |r| r.format_terminal(symbol),
        |r, w| r.export_csv(w),
    )
}
