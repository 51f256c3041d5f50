//! Period-over-period comparisons
//!
//! The current period always runs from its start through today; the previous
//! period is the full equivalent period before it.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::Transaction;
use crate::period::{Periods, WeekStart};

use super::types::{CategoryInsight, CategoryTrend, PeriodComparison};

/// Delta between two period totals
///
/// `change_percent` is 0 when there is nothing to compare against.
pub fn compare(current: f64, previous: f64) -> PeriodComparison {
    let change = current - previous;
    let change_percent = if previous == 0.0 {
        0.0
    } else {
        change / previous * 100.0
    };

    PeriodComparison {
        current,
        previous,
        change,
        change_percent,
    }
}

/// This month so far vs the whole of last month
pub fn month_over_month(transactions: &[Transaction], today: NaiveDate) -> PeriodComparison {
    month_over_month_for(transactions, &Periods::capture(today, WeekStart::default()))
}

pub fn month_over_month_for(transactions: &[Transaction], periods: &Periods) -> PeriodComparison {
    let current = sum_where(transactions, |date| periods.in_month_to_date(date));
    let previous = sum_where(transactions, |date| periods.in_last_month(date));
    compare(current, previous)
}

/// This year so far vs last year through the end of the same month
pub fn year_over_year(transactions: &[Transaction], today: NaiveDate) -> PeriodComparison {
    year_over_year_for(transactions, &Periods::capture(today, WeekStart::default()))
}

pub fn year_over_year_for(transactions: &[Transaction], periods: &Periods) -> PeriodComparison {
    let current = sum_where(transactions, |date| periods.in_year_to_date(date));
    let previous = sum_where(transactions, |date| periods.in_last_year_to_date(date));
    compare(current, previous)
}

/// Per-category breakdown of this month against last month, largest first
///
/// A category is `up` when this month exceeds last month by more than
/// `trend_band` (a fraction), `down` when it falls short by more than that.
/// Categories with no spending in either month are left out.
pub fn category_insights(
    transactions: &[Transaction],
    today: NaiveDate,
    trend_band: f64,
) -> Vec<CategoryInsight> {
    category_insights_for(
        transactions,
        &Periods::capture(today, WeekStart::default()),
        trend_band,
    )
}

pub fn category_insights_for(
    transactions: &[Transaction],
    periods: &Periods,
    trend_band: f64,
) -> Vec<CategoryInsight> {
    #[derive(Default)]
    struct Totals {
        current: f64,
        previous: f64,
        count: usize,
    }

    let mut by_category: BTreeMap<&str, Totals> = BTreeMap::new();
    for tx in transactions {
        let in_current = periods.in_month_to_date(tx.date);
        let in_previous = periods.in_last_month(tx.date);
        if !in_current && !in_previous {
            continue;
        }

        let totals = by_category.entry(tx.category.as_str()).or_default();
        if in_current {
            totals.current += tx.amount;
            totals.count += 1;
        }
        if in_previous {
            totals.previous += tx.amount;
        }
    }

    let month_total: f64 = by_category.values().map(|t| t.current).sum();

    let mut insights: Vec<CategoryInsight> = by_category
        .into_iter()
        .map(|(category, t)| {
            let trend = if t.current > t.previous * (1.0 + trend_band) {
                CategoryTrend::Up
            } else if t.current < t.previous * (1.0 - trend_band) {
                CategoryTrend::Down
            } else {
                CategoryTrend::Stable
            };

            CategoryInsight {
                category: category.to_string(),
                total: t.current,
                percentage: if month_total > 0.0 {
                    t.current / month_total * 100.0
                } else {
                    0.0
                },
                trend,
                average_per_transaction: if t.count > 0 {
                    t.current / t.count as f64
                } else {
                    0.0
                },
                transaction_count: t.count,
            }
        })
        .collect();

    insights.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    insights
}

fn sum_where(transactions: &[Transaction], pred: impl Fn(NaiveDate) -> bool) -> f64 {
    transactions
        .iter()
        .filter(|tx| pred(tx.date))
        .map(|tx| tx.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, tx};

    #[test]
    fn test_compare_guards_zero_previous() {
        let result = compare(500.0, 0.0);
        assert_eq!(result.change, 500.0);
        assert_eq!(result.change_percent, 0.0);

        let result = compare(150.0, 100.0);
        assert_eq!(result.change, 50.0);
        assert_eq!(result.change_percent, 50.0);
    }

    #[test]
    fn test_month_over_month() {
        let txs = vec![
            tx("1", 100.0, "Food", "2024-03-01"),
            tx("2", 50.0, "Food", "2024-03-14"),
            tx("3", 999.0, "Food", "2024-03-20"), // after today
            tx("4", 200.0, "Food", "2024-02-01"),
            tx("5", 100.0, "Food", "2024-02-29"),
            tx("6", 999.0, "Food", "2024-01-31"),
        ];
        let result = month_over_month(&txs, date("2024-03-14"));
        assert_eq!(result.current, 150.0);
        assert_eq!(result.previous, 300.0);
        assert_eq!(result.change, -150.0);
        assert_eq!(result.change_percent, -50.0);
    }

    #[test]
    fn test_month_over_month_no_history() {
        let txs = vec![tx("1", 80.0, "Food", "2024-03-02")];
        let result = month_over_month(&txs, date("2024-03-14"));
        assert_eq!(result.previous, 0.0);
        assert_eq!(result.change_percent, 0.0);
    }

    #[test]
    fn test_year_over_year_window() {
        let txs = vec![
            tx("1", 100.0, "Food", "2024-01-10"),
            tx("2", 100.0, "Food", "2024-03-14"),
            tx("3", 50.0, "Food", "2023-01-01"),
            tx("4", 50.0, "Food", "2023-03-31"), // end of same month last year
            tx("5", 999.0, "Food", "2023-04-01"),
            tx("6", 999.0, "Food", "2022-12-31"),
        ];
        let result = year_over_year(&txs, date("2024-03-14"));
        assert_eq!(result.current, 200.0);
        assert_eq!(result.previous, 100.0);
        assert_eq!(result.change_percent, 100.0);
    }

    #[test]
    fn test_category_insights() {
        let txs = vec![
            tx("1", 300.0, "Food", "2024-03-05"),
            tx("2", 100.0, "Food", "2024-03-10"),
            tx("3", 200.0, "Food", "2024-02-10"),
            tx("4", 100.0, "Transport", "2024-03-03"),
            tx("5", 500.0, "Transport", "2024-02-03"),
            tx("6", 50.0, "Bills", "2024-02-20"),
            tx("7", 55.0, "Bills", "2024-03-01"),
            tx("8", 70.0, "Other", "2023-06-01"),
        ];
        let insights = category_insights(&txs, date("2024-03-14"), 0.1);

        let names: Vec<&str> = insights.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(names, vec!["Food", "Transport", "Bills"]);

        let food = &insights[0];
        assert_eq!(food.total, 400.0);
        assert_eq!(food.transaction_count, 2);
        assert_eq!(food.average_per_transaction, 200.0);
        assert_eq!(food.trend, CategoryTrend::Up);
        assert!((food.percentage - 400.0 / 555.0 * 100.0).abs() < 1e-9);

        assert_eq!(insights[1].trend, CategoryTrend::Down);
        // 55 vs 50 is within the 10% band
        assert_eq!(insights[2].trend, CategoryTrend::Stable);

        let share: f64 = insights.iter().map(|i| i.percentage).sum();
        assert!((share - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_only_last_month() {
        let txs = vec![tx("1", 40.0, "Gifts", "2024-02-14")];
        let insights = category_insights(&txs, date("2024-03-14"), 0.1);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].total, 0.0);
        assert_eq!(insights[0].percentage, 0.0);
        assert_eq!(insights[0].average_per_transaction, 0.0);
        assert_eq!(insights[0].trend, CategoryTrend::Down);
    }
}
