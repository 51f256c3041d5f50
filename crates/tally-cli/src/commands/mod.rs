//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (context loading, config, --today, JSON output)
//! - `overview` - Stats, budgets, period comparisons, categories, streak
//! - `forecast` - Smoothing forecast, regression trend, momentum
//! - `patterns` - Volatility, anomalies, day-of-week patterns, habit insights
//! - `report` - Every analysis at once

pub mod core;
pub mod forecast;
pub mod overview;
pub mod patterns;
pub mod report;

// Re-export command functions for main.rs
pub use self::core::*;
pub use forecast::*;
pub use overview::*;
pub use patterns::*;
pub use report::*;

use tally_core::analytics::PeriodComparison;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Percent change for display; "n/a" when there is no previous period
pub fn format_change(cmp: &PeriodComparison) -> String {
    if cmp.previous == 0.0 {
        "n/a".to_string()
    } else {
        format!("{:+.1}%", cmp.change_percent)
    }
}
