//! `config` command: show paths and settings

use clap::Args;

use crate::config::{ForecastPaths, Settings};
use crate::error::ForecastResult;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the current settings to the config file
    #[arg(long)]
    pub init: bool,
}

/// Handle the config command
pub fn handle_config_command(
    paths: &ForecastPaths,
    settings: &Settings,
    args: ConfigArgs,
) -> ForecastResult<()> {
    if args.init {
        settings.save(paths)?;
        println!("Settings written to {}", paths.settings_file().display());
        println!();
    }

    println!("budget-forecast Configuration");
    println!("=============================");
    println!("Config directory: {}", paths.base_dir().display());
    println!(
        "Settings file:    {}{}",
        paths.settings_file().display(),
        if paths.is_initialized() { "" } else { " (not created)" }
    );
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Daily series:    {}", settings.daily_series);
    println!("  Strict import:   {}", settings.strict_import);

    Ok(())
}
