//! Overview commands: stats, budgets, comparisons, categories, streak

use anyhow::Result;

use tally_core::analytics::{should_show_budget_alert, BudgetStatus, PeriodComparison};

use super::core::{print_json, Context};
use super::{format_change, truncate};

pub fn cmd_stats(ctx: &Context) -> Result<()> {
    let stats = ctx.engine.stats(&ctx.snapshot, ctx.today);
    if ctx.json {
        return print_json(&stats);
    }

    println!();
    println!("📊 Spending Overview (as of {})", ctx.today);
    println!("   ─────────────────────────────────────────────");

    if ctx.snapshot.transactions.is_empty() {
        println!("   No transactions in snapshot.");
        return Ok(());
    }

    println!("   Today:          ${:>10.2}", stats.today);
    println!("   This week:      ${:>10.2}", stats.this_week);
    println!("   This month:     ${:>10.2}", stats.this_month);
    println!("   Last month:     ${:>10.2}", stats.last_month);
    println!("   Year to date:   ${:>10.2}", stats.year_to_date);
    println!("   All time:       ${:>10.2}", stats.total);
    println!();
    println!("   Daily average:  ${:>10.2}", stats.average_daily);
    println!("   Monthly (30d):  ${:>10.2}", stats.average_monthly);

    let mut categories: Vec<(&String, &f64)> = stats.by_category.iter().collect();
    categories.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

    println!();
    println!("   {:20} │ {:>10} │ {:>6}", "Category", "Amount", "%");
    println!("   ─────────────────────┼────────────┼───────");
    for (category, amount) in categories {
        let share = if stats.total > 0.0 {
            amount / stats.total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:20} │ {:>10.2} │ {:>5.1}%",
            truncate(category, 20),
            amount,
            share
        );
    }

    if !stats.budget_status.is_empty() {
        println!();
        print_budget_table(stats.budget_status.iter());
    }

    Ok(())
}

pub fn cmd_budgets(ctx: &Context) -> Result<()> {
    let status = ctx.engine.budget_status(&ctx.snapshot, ctx.today);
    if ctx.json {
        return print_json(&status);
    }

    println!();
    println!("💰 Budgets for {}", ctx.today.format("%B %Y"));
    println!("   ─────────────────────────────────────────────────────────────");

    if status.is_empty() {
        println!("   No active budgets.");
        return Ok(());
    }

    print_budget_table(status.iter());

    let alerts: Vec<&str> = ctx
        .snapshot
        .budgets
        .iter()
        .filter(|b| b.is_active)
        .filter(|b| {
            should_show_budget_alert(
                &b.category,
                &ctx.snapshot.budgets,
                &ctx.snapshot.transactions,
                ctx.today,
            )
        })
        .map(|b| b.category.as_str())
        .collect();

    if !alerts.is_empty() {
        println!();
        for category in alerts {
            println!("   ⚠️  {} has reached its alert threshold", category);
        }
    }

    Ok(())
}

fn print_budget_table<'a>(rows: impl Iterator<Item = (&'a String, &'a BudgetStatus)>) {
    println!(
        "   {:20} │ {:>10} │ {:>10} │ {:>7} │ {:>10}",
        "Budget", "Spent", "Limit", "Used", "Remaining"
    );
    println!("   ─────────────────────┼────────────┼────────────┼─────────┼────────────");
    for (category, status) in rows {
        let marker = if status.is_over_budget { " 🔴" } else { "" };
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ {:>6.1}% │ {:>10.2}{}",
            truncate(category, 20),
            status.spent,
            status.limit,
            status.percentage,
            status.remaining,
            marker
        );
    }
}

pub fn cmd_compare(ctx: &Context) -> Result<()> {
    let txs = &ctx.snapshot.transactions;
    let mom = ctx.engine.month_over_month(txs, ctx.today);
    let yoy = ctx.engine.year_over_year(txs, ctx.today);

    if ctx.json {
        return print_json(&serde_json::json!({
            "monthOverMonth": mom,
            "yearOverYear": yoy,
        }));
    }

    println!();
    println!("📈 Period Comparison (as of {})", ctx.today);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:22} │ {:>10} │ {:>10} │ {:>10} │ {:>8}",
        "", "Current", "Previous", "Change", "%"
    );
    println!("   ───────────────────────┼────────────┼────────────┼────────────┼─────────");
    print_comparison_row("Month over month", &mom);
    print_comparison_row("Year over year", &yoy);

    Ok(())
}

fn print_comparison_row(label: &str, cmp: &PeriodComparison) {
    println!(
        "   {:22} │ {:>10.2} │ {:>10.2} │ {:>+10.2} │ {:>8}",
        label,
        cmp.current,
        cmp.previous,
        cmp.change,
        format_change(cmp)
    );
}

pub fn cmd_categories(ctx: &Context) -> Result<()> {
    let insights = ctx
        .engine
        .category_insights(&ctx.snapshot.transactions, ctx.today);
    if ctx.json {
        return print_json(&insights);
    }

    println!();
    println!("🏷️  Categories this month vs last month");
    println!("   ─────────────────────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   No spending this month or last month.");
        return Ok(());
    }

    println!(
        "   {:20} │ {:>10} │ {:>6} │ {:>5} │ {:>9} │ {:6}",
        "Category", "Amount", "%", "Count", "Avg", "Trend"
    );
    println!("   ─────────────────────┼────────────┼────────┼───────┼───────────┼───────");
    for insight in &insights {
        println!(
            "   {:20} │ {:>10.2} │ {:>5.1}% │ {:>5} │ {:>9.2} │ {:6}",
            truncate(&insight.category, 20),
            insight.total,
            insight.percentage,
            insight.transaction_count,
            insight.average_per_transaction,
            insight.trend.as_str()
        );
    }

    Ok(())
}

pub fn cmd_streak(ctx: &Context) -> Result<()> {
    let streak = ctx.engine.streak(&ctx.snapshot.transactions, ctx.today);
    if ctx.json {
        return print_json(&streak);
    }

    println!();
    println!("🔥 Logging Streak");
    println!("   ─────────────────────────────────────────────");
    println!("   Current streak:  {} day(s)", streak.current_streak);
    println!("   Longest streak:  {} day(s)", streak.longest_streak);
    println!("   Days logged:     {}", streak.total_days);
    match streak.last_log_date {
        Some(date) => println!("   Last logged:     {}", date),
        None => println!("   Last logged:     never"),
    }

    Ok(())
}
