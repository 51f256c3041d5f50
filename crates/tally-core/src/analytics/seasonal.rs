//! Day-of-week spending patterns

use chrono::Datelike;

use crate::models::Transaction;

use super::types::SeasonalPattern;

/// Display names indexed by `SeasonalPattern::day_of_week`
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Average spend per weekday, highest first
///
/// Days are numbered 0 (Sunday) through 6 (Saturday). Weekdays with no
/// transactions are left out.
pub fn detect_seasonal_patterns(transactions: &[Transaction]) -> Vec<SeasonalPattern> {
    let mut totals = [0.0f64; 7];
    let mut counts = [0usize; 7];

    for tx in transactions {
        let day = tx.date.weekday().num_days_from_sunday() as usize;
        totals[day] += tx.amount;
        counts[day] += 1;
    }

    let mut patterns: Vec<SeasonalPattern> = (0..7)
        .filter(|&day| counts[day] > 0)
        .map(|day| SeasonalPattern {
            day_of_week: day as u32,
            average_spending: totals[day] / counts[day] as f64,
            frequency: counts[day],
        })
        .collect();

    // Stable sort keeps ties in weekday order
    patterns.sort_by(|a, b| {
        b.average_spending
            .partial_cmp(&a.average_spending)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    patterns
}

/// Name for a 0-based (Sunday first) weekday number
pub fn day_name(day_of_week: u32) -> &'static str {
    DAY_NAMES
        .get(day_of_week as usize)
        .copied()
        .unwrap_or("Unknown")
}
