//! Pattern commands: volatility, anomalies, day-of-week patterns, habits

use anyhow::Result;
use tally_core::analytics::{day_name, detect_anomalies_with, InsightKind, Level, SpendingInsight};
use tally_core::config::AnomalyConfig;

use super::core::{print_json, Context};
use super::truncate;

pub fn cmd_volatility(ctx: &Context) -> Result<()> {
    let metrics = ctx.engine.volatility(&ctx.snapshot.transactions);
    if ctx.json {
        return print_json(&metrics);
    }

    println!();
    println!("🎯 Spending Consistency");
    println!("   ─────────────────────────────────────────────");
    println!("   Consistency:    {:.0}/100", metrics.consistency_score);
    println!(
        "   Volatility:     {} {}",
        level_icon(metrics.volatility_level),
        metrics.volatility_level
    );
    println!("   Std deviation:  ${:.2}", metrics.standard_deviation);
    println!("   CV:             {:.3}", metrics.coefficient_of_variation);

    Ok(())
}

pub fn cmd_anomalies(ctx: &Context, threshold: Option<f64>) -> Result<()> {
    let txs = &ctx.snapshot.transactions;
    let anomalies = match threshold {
        Some(threshold) => {
            if !(threshold.is_finite() && threshold > 0.0) {
                anyhow::bail!("--threshold must be a positive number, got {}", threshold);
            }
            let config = AnomalyConfig {
                threshold,
                ..ctx.engine.config().anomaly.clone()
            };
            detect_anomalies_with(txs, &config)
        }
        None => ctx.engine.anomalies(txs),
    };

    if ctx.json {
        return print_json(&anomalies);
    }

    println!();
    println!("🚨 Unusual Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    if anomalies.is_empty() {
        println!("   Nothing unusual found.");
        return Ok(());
    }

    println!(
        "   {:10} │ {:16} │ {:>10} │ {:>6} │ {:8}",
        "Date", "Category", "Amount", "z", "Severity"
    );
    println!("   ───────────┼──────────────────┼────────────┼────────┼─────────");
    for alert in &anomalies {
        println!(
            "   {:10} │ {:16} │ {:>10.2} │ {:>+6.2} │ {} {}",
            alert.transaction.date,
            truncate(&alert.transaction.category, 16),
            alert.transaction.amount,
            alert.z_score,
            level_icon(alert.severity),
            alert.severity
        );
    }
    println!();
    for alert in &anomalies {
        let label = if alert.transaction.description.is_empty() {
            alert.transaction.id.as_str()
        } else {
            alert.transaction.description.as_str()
        };
        println!("   • {}: {}", truncate(label, 30), alert.reason);
    }

    Ok(())
}

pub fn cmd_seasonal(ctx: &Context) -> Result<()> {
    let patterns = ctx.engine.seasonal_patterns(&ctx.snapshot.transactions);
    if ctx.json {
        return print_json(&patterns);
    }

    println!();
    println!("📅 Spending by Day of Week");
    println!("   ─────────────────────────────────────────────");

    if patterns.is_empty() {
        println!("   No transactions yet.");
        return Ok(());
    }

    println!("   {:10} │ {:>10} │ {:>5}", "Day", "Average", "Count");
    println!("   ───────────┼────────────┼──────");
    for pattern in &patterns {
        println!(
            "   {:10} │ {:>10.2} │ {:>5}",
            day_name(pattern.day_of_week),
            pattern.average_spending,
            pattern.frequency
        );
    }

    Ok(())
}

pub fn cmd_insights(ctx: &Context) -> Result<()> {
    let insights = ctx.engine.insights(&ctx.snapshot.transactions);
    if ctx.json {
        return print_json(&insights);
    }

    println!();
    println!("💡 Spending Habits");
    println!("   ─────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   No habits stand out yet.");
        return Ok(());
    }

    for insight in &insights {
        println!("   • {}", describe_insight(insight));
    }

    Ok(())
}

fn describe_insight(insight: &SpendingInsight) -> String {
    let category = insight.category.as_deref().unwrap_or("uncategorized");
    match insight.kind {
        InsightKind::SmallExpenses => format!(
            "{} small expenses totaling ${:.0}, about ${:.0} a year",
            insight.count,
            insight.total,
            insight.yearly_impact.unwrap_or_default()
        ),
        InsightKind::DailyHabit => format!(
            "{} spending of ${:.0} adds up to ${:.0} a year at a daily pace",
            category,
            insight.total,
            insight.yearly_impact.unwrap_or_default()
        ),
        InsightKind::FrequentCategory => format!(
            "{} {} expenses logged; a budget of ${:.0} would cover them",
            insight.count,
            category,
            insight.suggested_limit.unwrap_or_default()
        ),
        InsightKind::Waste => format!(
            "${:.0} marked as waste; redirecting it could save ${:.0} a year",
            insight.total,
            insight.yearly_impact.unwrap_or_default()
        ),
        InsightKind::Joy => format!("${:.0} spent on things that brought joy", insight.total),
    }
}

fn level_icon(level: Level) -> &'static str {
    match level {
        Level::Low => "🟢",
        Level::Medium => "🟡",
        Level::High => "🔴",
    }
}
