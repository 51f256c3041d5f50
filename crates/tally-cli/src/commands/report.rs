//! Full analytics report

use anyhow::Result;

use super::core::{print_json, Context};
use super::{cmd_anomalies, cmd_categories, cmd_compare, cmd_forecast, cmd_insights};
use super::{cmd_momentum, cmd_seasonal, cmd_stats, cmd_streak, cmd_trend, cmd_volatility};

/// Every analysis in one pass
///
/// JSON output is a single `AnalyticsReport`; table output prints each
/// section in turn.
pub fn cmd_report(ctx: &Context) -> Result<()> {
    if ctx.json {
        let report = ctx.engine.report(&ctx.snapshot, ctx.today);
        return print_json(&report);
    }

    println!(
        "🧾 Tally report: {} transactions, {} budgets",
        ctx.snapshot.transactions.len(),
        ctx.snapshot.budgets.len()
    );

    cmd_stats(ctx)?;
    cmd_compare(ctx)?;
    cmd_categories(ctx)?;
    cmd_forecast(ctx)?;
    cmd_trend(ctx)?;
    cmd_momentum(ctx)?;
    cmd_volatility(ctx)?;
    cmd_anomalies(ctx, None)?;
    cmd_seasonal(ctx)?;
    cmd_streak(ctx)?;
    cmd_insights(ctx)?;

    Ok(())
}
