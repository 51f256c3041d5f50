//! Linear trend over the raw transaction series
//!
//! Ordinary least squares of amount (y) against days since the earliest
//! transaction (x).

use crate::config::RegressionConfig;
use crate::models::Transaction;

use super::types::{TrendAnalysis, TrendDirection, TrendStrength};

/// Fit a trend line with the default labelling thresholds
pub fn linear_regression(transactions: &[Transaction]) -> TrendAnalysis {
    linear_regression_with(transactions, &RegressionConfig::default())
}

/// Fit a trend line and label its direction and strength
pub fn linear_regression_with(
    transactions: &[Transaction],
    config: &RegressionConfig,
) -> TrendAnalysis {
    if transactions.len() < 2 {
        return flat(0.0);
    }

    let Some(first_date) = transactions.iter().map(|tx| tx.date).min() else {
        return flat(0.0);
    };

    let points: Vec<(f64, f64)> = transactions
        .iter()
        .map(|tx| ((tx.date - first_date).num_days() as f64, tx.amount))
        .collect();

    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
    let sum_x2: f64 = points.iter().map(|(x, _)| x * x).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        // Every transaction on the same day: no time axis to regress on
        tracing::debug!(points = points.len(), "Degenerate regression, all x equal");
        return flat(sum_y / n);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    let y_mean = sum_y / n;
    let ss_total: f64 = points.iter().map(|(_, y)| (y - y_mean).powi(2)).sum();
    let ss_residual: f64 = points
        .iter()
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    let r_squared = if ss_total == 0.0 {
        0.0
    } else {
        1.0 - ss_residual / ss_total
    };

    let strength = if r_squared > config.strong_r_squared {
        TrendStrength::Strong
    } else if r_squared > config.moderate_r_squared {
        TrendStrength::Moderate
    } else {
        TrendStrength::Weak
    };

    TrendAnalysis {
        slope,
        intercept,
        r_squared: r_squared.clamp(0.0, 1.0),
        direction: TrendDirection::from_threshold(slope, config.slope_threshold),
        strength,
    }
}

fn flat(intercept: f64) -> TrendAnalysis {
    TrendAnalysis {
        slope: 0.0,
        intercept,
        r_squared: 0.0,
        direction: TrendDirection::Stable,
        strength: TrendStrength::Weak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{daily_series, tx};

    #[test]
    fn test_too_few_points() {
        let result = linear_regression(&[tx("1", 50.0, "Food", "2024-01-01")]);
        assert_eq!(result.slope, 0.0);
        assert_eq!(result.intercept, 0.0);
        assert_eq!(result.r_squared, 0.0);
        assert_eq!(result.direction, TrendDirection::Stable);
        assert_eq!(result.strength, TrendStrength::Weak);
    }

    #[test]
    fn test_two_points_ten_days_apart() {
        let txs = vec![
            tx("1", 100.0, "Food", "2024-01-01"),
            tx("2", 200.0, "Food", "2024-01-11"),
        ];
        let result = linear_regression(&txs);
        assert!((result.slope - 10.0).abs() < 1e-9);
        assert!((result.intercept - 100.0).abs() < 1e-9);
        assert!((result.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(result.direction, TrendDirection::Increasing);
        assert_eq!(result.strength, TrendStrength::Strong);
    }

    #[test]
    fn test_order_does_not_matter() {
        let forward = vec![
            tx("1", 300.0, "Food", "2024-01-01"),
            tx("2", 200.0, "Food", "2024-01-11"),
            tx("3", 50.0, "Food", "2024-01-21"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = linear_regression(&forward);
        let b = linear_regression(&reversed);
        assert!((a.slope - b.slope).abs() < 1e-9);
        assert_eq!(a.direction, TrendDirection::Decreasing);
    }

    #[test]
    fn test_identical_amounts_have_zero_r_squared() {
        let txs = daily_series("Food", "2024-01-01", &[40.0, 40.0, 40.0, 40.0]);
        let result = linear_regression(&txs);
        assert!(result.slope.abs() < 1e-12);
        assert_eq!(result.r_squared, 0.0);
        assert_eq!(result.direction, TrendDirection::Stable);
        assert_eq!(result.strength, TrendStrength::Weak);
    }

    #[test]
    fn test_same_day_points_are_degenerate() {
        let txs = vec![
            tx("1", 10.0, "Food", "2024-01-01"),
            tx("2", 30.0, "Food", "2024-01-01"),
        ];
        let result = linear_regression(&txs);
        assert_eq!(result.slope, 0.0);
        assert_eq!(result.intercept, 20.0);
        assert!(result.r_squared.is_finite());
        assert_eq!(result.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_noisy_series_is_weak() {
        let txs = daily_series("Food", "2024-01-01", &[10.0, 90.0, 15.0, 85.0, 88.0, 12.0]);
        let result = linear_regression(&txs);
        assert!(result.r_squared < 0.4);
        assert_eq!(result.strength, TrendStrength::Weak);
        assert_eq!(result.direction, TrendDirection::Stable);
    }
}
