//! Test utilities for tally-core
//!
//! Terse builders for transactions and snapshots so tests read like the
//! ledgers they describe.

use chrono::NaiveDate;

use crate::models::{Budget, Transaction};
use crate::snapshot::Snapshot;

/// Parse a `YYYY-MM-DD` literal
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date must be YYYY-MM-DD")
}

/// Build a transaction from literals
pub fn tx(id: &str, amount: f64, category: &str, on: &str) -> Transaction {
    Transaction::new(id, amount, category, date(on))
}

/// Build one transaction per amount, all in `category` on consecutive days from `start`
pub fn daily_series(category: &str, start: &str, amounts: &[f64]) -> Vec<Transaction> {
    let start = date(start);
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| {
            Transaction::new(
                format!("{}-{}", category.to_lowercase(), i),
                *amount,
                category,
                start + chrono::Duration::days(i as i64),
            )
        })
        .collect()
}

/// A snapshot with the given transactions and budgets
pub fn snapshot(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Snapshot {
    Snapshot::new(transactions, budgets)
}
