//! `daily` command: per-day spending series of one month

use std::path::PathBuf;

use clap::Args;

use super::{emit_report, load_transactions, CliContext, OutputArgs};
use crate::error::ForecastResult;
use crate::models::{MonthKey, SeriesDensity};
use crate::reports::DailySpendingReport;
use crate::services::MonthSummaryAggregator;

#[derive(Args, Debug)]
pub struct DailyArgs {
    /// Transactions file (.json or .csv)
    pub input: PathBuf,

    /// Month to chart, YYYY-MM
    #[arg(short, long)]
    pub month: MonthKey,

    /// Only list days that have transactions
    #[arg(long)]
    pub sparse: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Handle the daily command
pub fn handle_daily_command(ctx: &CliContext, args: DailyArgs) -> ForecastResult<()> {
    let transactions = load_transactions(ctx, &args.input)?;
    let summaries = MonthSummaryAggregator::new(args.month).aggregate(&transactions);

    let density = if args.sparse {
        SeriesDensity::Sparse
    } else {
        ctx.settings.daily_series
    };
    let report = DailySpendingReport::generate(args.month, &summaries, density);

    let symbol = ctx.settings.currency_symbol.as_str();
    emit_report(
        &report,
        &args.output,
        |r| r.format_terminal(symbol),
        |r, w| r.export_csv(w),
    )
}
