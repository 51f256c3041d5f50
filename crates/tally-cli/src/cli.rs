//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Understand where your money goes
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Expense analytics and forecasting over a Tally data export", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot file (JSON export of transactions and budgets)
    #[arg(long, default_value = "tally.json", global = true)]
    pub snapshot: PathBuf,

    /// Analytics config file (defaults to the user override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Analyze as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Print result records as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Period totals, category breakdown and averages
    Stats,

    /// Spend vs limit for each active budget this month
    Budgets,

    /// Forecast next month's spending
    Forecast,

    /// Linear trend over all transactions
    Trend,

    /// Spending consistency score
    Volatility,

    /// Unusually large or small transactions
    Anomalies {
        /// Z-score above which a transaction is flagged (defaults to config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Average spending by day of week
    Seasonal,

    /// Month-over-month and year-over-year comparison
    Compare,

    /// Per-category breakdown of this month vs last month
    Categories,

    /// Short vs long moving-average momentum
    Momentum,

    /// Consecutive days with logged expenses
    Streak,

    /// Habit observations: small purchases, frequent categories, waste and joy
    Insights,

    /// Run every analysis
    Report,
}
