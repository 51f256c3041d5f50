//! Logging streaks over distinct transaction dates

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::models::Transaction;

use super::types::StreakData;

/// Consecutive-day logging streaks as of `today`
///
/// The current streak counts back from today and is 0 if nothing was logged
/// today. Dates after today are ignored.
pub fn calculate_streak(transactions: &[Transaction], today: NaiveDate) -> StreakData {
    let dates: BTreeSet<NaiveDate> = transactions
        .iter()
        .map(|tx| tx.date)
        .filter(|date| *date <= today)
        .collect();

    let Some(&last_log_date) = dates.iter().next_back() else {
        return StreakData::default();
    };

    let mut current_streak = 0u32;
    let mut expected = today;
    for date in dates.iter().rev() {
        if *date != expected {
            break;
        }
        current_streak += 1;
        expected -= Duration::days(1);
    }

    let mut longest_streak = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;
    for &date in &dates {
        run = match previous {
            Some(prev) if date - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(run);
        previous = Some(date);
    }

    StreakData {
        current_streak,
        longest_streak,
        last_log_date: Some(last_log_date),
        total_days: dates.len(),
    }
}
