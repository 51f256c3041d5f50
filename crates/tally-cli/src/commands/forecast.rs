//! Forecast commands: smoothing forecast, regression trend, momentum

use anyhow::Result;
use tally_core::analytics::{calculate_impact, MomentumSignal, TrendDirection};

use super::core::{print_json, Context};

pub fn cmd_forecast(ctx: &Context) -> Result<()> {
    let txs = &ctx.snapshot.transactions;
    let prediction = ctx.engine.forecast(txs);
    let estimate = ctx.engine.next_month_estimate(txs, ctx.today);

    if ctx.json {
        return print_json(&serde_json::json!({
            "prediction": prediction,
            "nextMonthEstimate": estimate,
        }));
    }

    println!();
    println!("🔮 Next Month Forecast");
    println!("   ─────────────────────────────────────────────");

    if txs.is_empty() {
        println!("   No transactions to forecast from.");
        return Ok(());
    }

    println!("   Forecast:       ${:.2}", prediction.value);
    println!(
        "   Range:          ${:.2} - ${:.2}",
        prediction.confidence_interval.lower, prediction.confidence_interval.upper
    );
    println!("   Accuracy:       {:.0}%", prediction.accuracy * 100.0);
    println!(
        "   Trend:          {} {}",
        trend_icon(prediction.trend),
        prediction.trend
    );
    println!("   Method:         {}", prediction.method);
    println!();
    println!(
        "   Trailing {}-month average: ${:.2}",
        ctx.engine.config().forecast.lookback_months,
        estimate
    );

    Ok(())
}

pub fn cmd_trend(ctx: &Context) -> Result<()> {
    let trend = ctx.engine.trend(&ctx.snapshot.transactions);
    if ctx.json {
        return print_json(&trend);
    }

    println!();
    println!("📉 Spending Trend");
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Direction:      {} {} ({})",
        trend_icon(trend.direction),
        trend.direction,
        trend.strength
    );
    println!("   Slope:          {:+.2} per day", trend.slope);
    println!("   Intercept:      {:.2}", trend.intercept);
    println!("   R²:             {:.3}", trend.r_squared);

    Ok(())
}

pub fn cmd_momentum(ctx: &Context) -> Result<()> {
    let mac = ctx.engine.momentum(&ctx.snapshot.transactions, ctx.today);
    if ctx.json {
        return print_json(&mac);
    }

    let momentum = &ctx.engine.config().momentum;
    let impact = calculate_impact(mac.short_ma);

    println!();
    println!("⚡ Spending Momentum");
    println!("   ─────────────────────────────────────────────");
    println!(
        "   {}-day average:  ${:.2}/day",
        momentum.short_days, mac.short_ma
    );
    println!(
        "   {}-day average: ${:.2}/day",
        momentum.long_days, mac.long_ma
    );
    println!("   Signal:         {}", signal_label(mac.signal));
    println!();
    println!(
        "   At the current pace: ${:.2}/month, ${:.2}/year",
        impact.monthly, impact.yearly
    );

    Ok(())
}

fn trend_icon(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Increasing => "↗",
        TrendDirection::Decreasing => "↘",
        TrendDirection::Stable => "→",
    }
}

fn signal_label(signal: MomentumSignal) -> &'static str {
    match signal {
        MomentumSignal::Bearish => "🔺 bearish (spending accelerating)",
        MomentumSignal::Bullish => "🔻 bullish (spending slowing)",
        MomentumSignal::Neutral => "➖ neutral",
    }
}
