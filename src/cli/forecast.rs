//! `forecast` command: month overview with budget forecast

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use tracing::info;

use super::{emit_report, load_transactions, CliContext, OutputArgs};
use crate::error::{ForecastError, ForecastResult};
use crate::import::{check_limit_error, read_budget_file};
use crate::models::{CategoryBudget, Money, MonthCalendar, MonthKey, MonthTotal};
use crate::reports::MonthOverviewReport;
use crate::services::MonthSummaryAggregator;

#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Transactions file (.json or .csv)
    pub input: PathBuf,

    /// Month to forecast, YYYY-MM (defaults to the month of --today)
    #[arg(short, long)]
    pub month: Option<MonthKey>,

    /// Budget file (JSON array of months)
    #[arg(short, long, conflicts_with = "budgeted")]
    pub budget: Option<PathBuf>,

    /// Total budgeted for the month, in minor units
    #[arg(long, allow_hyphen_values = true)]
    pub budgeted: Option<i64>,

    /// Reference date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Handle the forecast command
pub fn handle_forecast_command(ctx: &CliContext, args: ForecastArgs) -> ForecastResult<()> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let current_month = MonthKey::from_date(today);
    let month = args.month.unwrap_or(current_month);

    let transactions = load_transactions(ctx, &args.input)?;
    let summaries = MonthSummaryAggregator::new(current_month).aggregate(&transactions);
    let activity = summaries
        .get(&month)
        .map(|s| s.total_activity())
        .unwrap_or_default();

    let (totals, categories) = match (&args.budget, args.budgeted) {
        (Some(path), _) => budget_from_file(path, month, activity)?,
        (None, Some(budgeted)) => {
            let budgeted = Money::from_cents(budgeted);
            if !budgeted.is_within_limit() {
                return Err(check_limit_error("--budgeted".into(), budgeted));
            }
            (MonthTotal::new(budgeted, activity), Vec::new())
        }
        (None, None) => {
            info!(%month, "no budget given, forecasting against zero");
            (MonthTotal::new(Money::zero(), activity), Vec::new())
        }
    };

    let calendar = MonthCalendar::for_month(month, today);
    let report = MonthOverviewReport::generate(
        month,
        &summaries,
        totals,
        &categories,
        calendar,
        ctx.settings.daily_series,
    );
    info!(
        %month,
        day_of_month = calendar.day_of_month,
        over_pace = report.forecast.is_over_pace(),
        "computed month forecast"
    );

    let symbol = ctx.settings.currency_symbol.as_str();
    emit_report(
        &report,
        &args.output,
        |r| r.format_terminal(symbol),
        |r, w| r.export_csv(w),
    )
}

/// Totals and categories of `month` from a budget file
///
/// A month that lists neither activity nor categories takes its activity
/// from the transactions.
fn budget_from_file(
    path: &std::path::Path,
    month: MonthKey,
    activity: Money,
) -> ForecastResult<(MonthTotal, Vec<CategoryBudget>)> {
    let budget = read_budget_file(path)?
        .into_iter()
        .find(|b| b.month == month)
        .ok_or_else(|| ForecastError::budget_month_not_found(month))?;

    let mut totals = budget.total();
    if budget.total_activity.is_none() && budget.categories.is_empty() {
        totals.total_activity = activity;
        if budget.total_balance.is_none() {
            totals.total_balance = totals.remaining_budget();
        }
    }

    Ok((totals, budget.categories))
}
