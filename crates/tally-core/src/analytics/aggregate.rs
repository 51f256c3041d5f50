//! Aggregation engine
//!
//! Period totals, per-category sums and running averages over the whole log.

use chrono::{Duration, NaiveDate};

use crate::models::{Budget, Transaction};
use crate::period::{Periods, WeekStart};

use super::budget::check_budget_status;
use super::types::{ExpenseStats, SpendingImpact};

/// Compute period totals with a Sunday week start
pub fn calculate_stats(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
) -> ExpenseStats {
    calculate_stats_for(
        transactions,
        budgets,
        &Periods::capture(today, WeekStart::Sunday),
    )
}

/// Compute period totals against boundaries captured by the caller
pub fn calculate_stats_for(
    transactions: &[Transaction],
    budgets: &[Budget],
    periods: &Periods,
) -> ExpenseStats {
    let mut stats = ExpenseStats::default();

    for tx in transactions {
        let amount = tx.amount;
        stats.total += amount;

        if periods.is_today(tx.date) {
            stats.today += amount;
        }
        if periods.in_this_week(tx.date) {
            stats.this_week += amount;
        }
        if periods.in_this_month(tx.date) {
            stats.this_month += amount;
        }
        if periods.in_last_month(tx.date) {
            stats.last_month += amount;
        }
        if periods.in_year_to_date(tx.date) {
            stats.year_to_date += amount;
        }

        *stats.by_category.entry(tx.category.clone()).or_insert(0.0) += amount;
    }

    if let Some(oldest) = transactions.iter().map(|tx| tx.date).min() {
        let days_since_first = (periods.today - oldest).num_days().max(1);
        stats.average_daily = stats.total / days_since_first as f64;
        stats.average_monthly = stats.average_daily * 30.0;
    }

    stats.budget_status = check_budget_status(transactions, budgets, periods.today);

    tracing::debug!(
        transactions = transactions.len(),
        categories = stats.by_category.len(),
        total = stats.total,
        "Stats computed"
    );

    stats
}

/// Transactions dated within the last `days` days, today included
pub fn transactions_in_last_days(
    transactions: &[Transaction],
    days: u32,
    today: NaiveDate,
) -> Vec<Transaction> {
    let cutoff = today - Duration::days(days as i64);
    transactions
        .iter()
        .filter(|tx| tx.date > cutoff)
        .cloned()
        .collect()
}

/// Project a daily amount over a 30-day month and a 365-day year
pub fn calculate_impact(daily_amount: f64) -> SpendingImpact {
    SpendingImpact {
        monthly: daily_amount * 30.0,
        yearly: daily_amount * 365.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, tx};

    fn ledger() -> Vec<Transaction> {
        vec![
            tx("1", 10.0, "Food", "2024-03-14"),     // today (Thursday)
            tx("2", 20.0, "Transport", "2024-03-10"), // Sunday, this week
            tx("3", 30.0, "Food", "2024-03-09"),     // Saturday, last week
            tx("4", 40.0, "Bills", "2024-02-15"),    // last month
            tx("5", 50.0, "Food", "2024-01-02"),     // this year
            tx("6", 60.0, "Other", "2023-12-31"),    // last year
        ]
    }

    #[test]
    fn test_period_buckets() {
        let stats = calculate_stats(&ledger(), &[], date("2024-03-14"));

        assert_eq!(stats.total, 210.0);
        assert_eq!(stats.today, 10.0);
        assert_eq!(stats.this_week, 30.0);
        assert_eq!(stats.this_month, 60.0);
        assert_eq!(stats.last_month, 40.0);
        assert_eq!(stats.year_to_date, 150.0);
        assert_eq!(stats.by_category["Food"], 90.0);
        assert!(stats.budget_status.is_empty());
    }

    #[test]
    fn test_by_category_sums_to_total() {
        let stats = calculate_stats(&ledger(), &[], date("2024-03-14"));
        let sum: f64 = stats.by_category.values().sum();
        assert!((sum - stats.total).abs() < 1e-9);
    }

    #[test]
    fn test_averages() {
        let stats = calculate_stats(&ledger(), &[], date("2024-03-14"));
        // 2023-12-31 to 2024-03-14 is 74 days
        assert!((stats.average_daily - 210.0 / 74.0).abs() < 1e-9);
        assert!((stats.average_monthly - stats.average_daily * 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_day_dataset_uses_one_day() {
        let txs = vec![tx("1", 12.0, "Food", "2024-03-14")];
        let stats = calculate_stats(&txs, &[], date("2024-03-14"));
        assert_eq!(stats.average_daily, 12.0);
        assert_eq!(stats.average_monthly, 360.0);
    }

    #[test]
    fn test_empty_input() {
        let stats = calculate_stats(&[], &[], date("2024-03-14"));
        assert_eq!(stats, ExpenseStats::default());
    }

    #[test]
    fn test_idempotent() {
        let txs = ledger();
        let budgets = vec![Budget::new("Food", 100.0)];
        let today = date("2024-03-14");

        let first = calculate_stats(&txs, &budgets, today);
        let second = calculate_stats(&txs, &budgets, today);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        // Inputs untouched
        assert_eq!(txs, ledger());
    }

    #[test]
    fn test_monday_week_start() {
        let periods = Periods::capture(date("2024-03-14"), WeekStart::Monday);
        let stats = calculate_stats_for(&ledger(), &[], &periods);
        // Sunday 2024-03-10 belongs to the previous Monday-start week
        assert_eq!(stats.this_week, 10.0);
    }

    #[test]
    fn test_last_days_window() {
        let recent = transactions_in_last_days(&ledger(), 7, date("2024-03-14"));
        let ids: Vec<_> = recent.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_impact() {
        let impact = calculate_impact(10.0);
        assert_eq!(impact.monthly, 300.0);
        assert_eq!(impact.yearly, 3650.0);
    }
}
