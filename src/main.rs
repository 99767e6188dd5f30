use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use budget_forecast::cli::{
    handle_config_command, handle_daily_command, handle_forecast_command, handle_project_command,
    handle_summary_command, CliContext, ConfigArgs, DailyArgs, ForecastArgs, ProjectArgs,
    SummaryArgs,
};
use budget_forecast::config::{paths::ForecastPaths, settings::Settings};
use budget_forecast::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "budget-forecast",
    version,
    about = "Monthly spending summaries and budget forecasts",
    long_about = "budget-forecast aggregates a transactions file into per-month, \
                  per-category summaries, charts daily spending, forecasts \
                  how a month's budget will end up at the current pace, and \
                  projects account balances over the coming days."
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Fail on the first invalid transaction instead of skipping it
    #[arg(long, global = true, env = "BUDGET_FORECAST_STRICT")]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize transactions per month and category
    Summary(SummaryArgs),

    /// Forecast a month's budget from its spending pace
    Forecast(ForecastArgs),

    /// Show the daily spending series of a month
    Daily(DailyArgs),

    /// Project account balances day by day
    Project(ProjectArgs),

    /// Show current configuration and paths
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = ForecastPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let ctx = CliContext::new(settings, cli.strict);

    match cli.command {
        Commands::Summary(args) => handle_summary_command(&ctx, args)?,
        Commands::Forecast(args) => handle_forecast_command(&ctx, args)?,
        Commands::Daily(args) => handle_daily_command(&ctx, args)?,
        Commands::Project(args) => handle_project_command(&ctx, args)?,
        Commands::Config(args) => handle_config_command(&paths, &ctx.settings, args)?,
    }

    Ok(())
}
