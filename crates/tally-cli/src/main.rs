//! Tally CLI - Expense analytics over a data export
//!
//! Usage:
//!   tally stats                      Period totals and category breakdown
//!   tally forecast                   Next month's spending forecast
//!   tally anomalies --threshold 2.5  Unusual transactions
//!   tally report --json              Every analysis as one JSON record

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let ctx = commands::load_context(
        &cli.snapshot,
        cli.config.as_deref(),
        cli.today.as_deref(),
        cli.json,
    )?;

    match cli.command {
        Commands::Stats => commands::cmd_stats(&ctx),
        Commands::Budgets => commands::cmd_budgets(&ctx),
        Commands::Forecast => commands::cmd_forecast(&ctx),
        Commands::Trend => commands::cmd_trend(&ctx),
        Commands::Volatility => commands::cmd_volatility(&ctx),
        Commands::Anomalies { threshold } => commands::cmd_anomalies(&ctx, threshold),
        Commands::Seasonal => commands::cmd_seasonal(&ctx),
        Commands::Compare => commands::cmd_compare(&ctx),
        Commands::Categories => commands::cmd_categories(&ctx),
        Commands::Momentum => commands::cmd_momentum(&ctx),
        Commands::Streak => commands::cmd_streak(&ctx),
        Commands::Insights => commands::cmd_insights(&ctx),
        Commands::Report => commands::cmd_report(&ctx),
    }
}
