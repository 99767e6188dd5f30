//! `summary` command: per-month aggregation of a transactions file

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::{emit_report, load_transactions, CliContext, OutputArgs};
use crate::error::ForecastResult;
use crate::models::MonthKey;
use crate::reports::MonthSummaryReport;
use crate::services::MonthSummaryAggregator;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Transactions file (.json or .csv)
    pub input: PathBuf,

    /// Month to flag as current, YYYY-MM (defaults to this month)
    #[arg(long)]
    pub current_month: Option<MonthKey>,

    /// Aggregate each month on its own thread
    #[arg(long)]
    pub parallel: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Handle the summary command
pub fn handle_summary_command(ctx: &CliContext, args: SummaryArgs) -> ForecastResult<()> {
    let transactions = load_transactions(ctx, &args.input)?;
    let current_month = args.current_month.unwrap_or_else(MonthKey::current);
    let aggregator = MonthSummaryAggregator::new(current_month);

    let summaries = if args.parallel {
        aggregator.aggregate_partitioned(&transactions)
    } else {
        aggregator.aggregate(&transactions)
    };
    info!(
        transactions = transactions.len(),
        months = summaries.len(),
        "summarized transactions"
    );

    let report = MonthSummaryReport::generate(&summaries);
    let symbol = ctx.settings.currency_symbol.as_str();
    emit_report(
        &report,
        &args.output,
        |r| r.format_terminal(symbol),
        |r, w| r.export_csv(w),
    )
}
