//! Spending habit insights
//!
//! Rule-based observations over the whole log:
//! - Many small purchases, projected over a year
//! - Everyday categories (e.g. food) with a low average ticket
//! - Frequently logged categories, with a suggested monthly limit
//! - Spend the user classified as waste or joy
//!
//! Rules are evaluated in that order and the list is cut at the configured
//! limit, so earlier rules win when several fire.

use std::collections::BTreeMap;

use crate::config::InsightConfig;
use crate::models::{Classification, Transaction};

use super::types::{InsightKind, SpendingInsight};

/// Months in a year, for monthly-to-yearly projections
const MONTHS_PER_YEAR: f64 = 12.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// Habit insights with the default thresholds
pub fn generate_insights(transactions: &[Transaction]) -> Vec<SpendingInsight> {
    generate_insights_with(transactions, &InsightConfig::default())
}

pub fn generate_insights_with(
    transactions: &[Transaction],
    config: &InsightConfig,
) -> Vec<SpendingInsight> {
    let mut insights = Vec::new();

    if let Some(insight) = small_expenses(transactions, config) {
        insights.push(insight);
    }

    let mut by_category: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for tx in transactions {
        let entry = by_category.entry(tx.category.as_str()).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let keyword = config.habit_keyword.to_lowercase();
    for (category, (total, count)) in by_category {
        let average = total / count as f64;

        if category.to_lowercase().contains(&keyword) && average < config.habit_average {
            insights.push(SpendingInsight {
                kind: InsightKind::DailyHabit,
                category: Some(category.to_string()),
                count,
                total,
                yearly_impact: Some(total * DAYS_PER_YEAR),
                suggested_limit: None,
            });
        }

        if count > config.frequent_count {
            insights.push(SpendingInsight {
                kind: InsightKind::FrequentCategory,
                category: Some(category.to_string()),
                count,
                total,
                yearly_impact: None,
                suggested_limit: Some(total * config.budget_headroom),
            });
        }
    }

    if let Some((total, count)) = classified(transactions, Classification::Waste) {
        insights.push(SpendingInsight {
            kind: InsightKind::Waste,
            category: None,
            count,
            total,
            yearly_impact: Some(total * MONTHS_PER_YEAR),
            suggested_limit: None,
        });
    }

    if let Some((total, count)) = classified(transactions, Classification::Joy) {
        insights.push(SpendingInsight {
            kind: InsightKind::Joy,
            category: None,
            count,
            total,
            yearly_impact: None,
            suggested_limit: None,
        });
    }

    tracing::debug!(
        found = insights.len(),
        limit = config.limit,
        "Habit insights evaluated"
    );

    insights.truncate(config.limit);
    insights
}

fn small_expenses(transactions: &[Transaction], config: &InsightConfig) -> Option<SpendingInsight> {
    let small: Vec<f64> = transactions
        .iter()
        .map(|tx| tx.amount)
        .filter(|amount| *amount > 0.0 && *amount < config.small_amount)
        .collect();

    if small.len() <= config.small_count {
        return None;
    }

    let total: f64 = small.iter().sum();
    Some(SpendingInsight {
        kind: InsightKind::SmallExpenses,
        category: None,
        count: small.len(),
        total,
        yearly_impact: Some(total * MONTHS_PER_YEAR),
        suggested_limit: None,
    })
}

/// Total and count of transactions carrying `classification`, if any
fn classified(transactions: &[Transaction], classification: Classification) -> Option<(f64, usize)> {
    let matching: Vec<f64> = transactions
        .iter()
        .filter(|tx| tx.classification == Some(classification))
        .map(|tx| tx.amount)
        .collect();

    if matching.is_empty() {
        None
    } else {
        Some((matching.iter().sum(), matching.len()))
    }
}
