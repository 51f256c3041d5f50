//! Spending forecasts
//!
//! - Level + trend exponential smoothing over monthly aggregates
//! - Simple trailing-average prediction for next month
//! - Short vs long moving-average momentum

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::config::{ForecastConfig, MomentumConfig};
use crate::models::Transaction;
use crate::period::{month_key, shift_months_back, start_of_month, within};

use super::stats::{mean, standard_deviation};
use super::types::{
    ConfidenceInterval, ForecastMethod, MomentumSignal, MovingAverageConvergence,
    PredictionResult, TrendDirection,
};

/// Sum amounts per `YYYY-MM`, in chronological order
///
/// Months with no transactions are absent rather than zero.
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for tx in transactions {
        *months.entry(month_key(tx.date)).or_insert(0.0) += tx.amount;
    }
    months.into_iter().collect()
}

/// Forecast next month's spend with the default smoothing constants
pub fn exponential_smoothing(transactions: &[Transaction]) -> PredictionResult {
    exponential_smoothing_with(transactions, &ForecastConfig::default())
}

/// Forecast next month's spend with level (`alpha`) and trend (`beta`) smoothing
pub fn exponential_smoothing_with(
    transactions: &[Transaction],
    config: &ForecastConfig,
) -> PredictionResult {
    let monthly: Vec<f64> = monthly_totals(transactions)
        .into_iter()
        .map(|(_, total)| total)
        .collect();

    if monthly.is_empty() {
        return PredictionResult {
            value: 0.0,
            confidence_interval: ConfidenceInterval {
                lower: 0.0,
                upper: 0.0,
            },
            method: ForecastMethod::ExponentialSmoothing,
            accuracy: 0.0,
            trend: TrendDirection::Stable,
        };
    }

    if monthly.len() < 2 {
        let avg = mean(&monthly);
        tracing::debug!(months = monthly.len(), "Too few months to smooth, using average");
        return PredictionResult {
            value: avg,
            confidence_interval: ConfidenceInterval {
                lower: avg * 0.8,
                upper: avg * 1.2,
            },
            method: ForecastMethod::ExponentialSmoothing,
            accuracy: 0.5,
            trend: TrendDirection::Stable,
        };
    }

    let (alpha, beta) = (config.alpha, config.beta);
    let mut level = monthly[0];
    let mut trend = monthly[1] - monthly[0];

    // (one-step-ahead prediction, actual)
    let mut predictions: Vec<(f64, f64)> = Vec::with_capacity(monthly.len() - 1);

    for &actual in &monthly[1..] {
        predictions.push((level + trend, actual));

        let prev_level = level;
        level = alpha * actual + (1.0 - alpha) * (level + trend);
        trend = beta * (level - prev_level) + (1.0 - beta) * trend;
    }

    let forecast = level + trend;

    // Zero-actual months are left out of the MAPE; with none left it is 0
    let percentage_errors: Vec<f64> = predictions
        .iter()
        .filter(|(_, actual)| *actual != 0.0)
        .map(|(predicted, actual)| ((actual - predicted) / actual).abs())
        .collect();
    let accuracy = if percentage_errors.is_empty() {
        1.0
    } else {
        (1.0 - mean(&percentage_errors)).max(0.0)
    };

    let errors: Vec<f64> = predictions
        .iter()
        .map(|(predicted, actual)| (predicted - actual).abs())
        .collect();
    let error_std = standard_deviation(&errors);

    tracing::debug!(
        months = monthly.len(),
        forecast,
        trend,
        accuracy,
        "Exponential smoothing complete"
    );

    PredictionResult {
        value: forecast.max(0.0),
        confidence_interval: ConfidenceInterval {
            lower: (forecast - 2.0 * error_std).max(0.0),
            upper: forecast + 2.0 * error_std,
        },
        method: ForecastMethod::ExponentialSmoothing,
        accuracy,
        trend: TrendDirection::from_threshold(trend, config.trend_epsilon),
    }
}

/// Average monthly spend over the trailing `lookback_months` calendar months
///
/// The window runs from the first day of the month `lookback_months` ago
/// through today, divided by `lookback_months`.
pub fn predict_next_month_spending(
    transactions: &[Transaction],
    today: NaiveDate,
    lookback_months: u32,
) -> f64 {
    if lookback_months == 0 {
        return 0.0;
    }

    let start = start_of_month(shift_months_back(today, lookback_months));
    let recent: Vec<f64> = transactions
        .iter()
        .filter(|tx| within(tx.date, start, today))
        .map(|tx| tx.amount)
        .collect();

    if recent.is_empty() {
        return 0.0;
    }

    recent.iter().sum::<f64>() / lookback_months as f64
}

/// Compare short- and long-window daily averages to detect momentum shifts
pub fn moving_average_convergence(
    transactions: &[Transaction],
    today: NaiveDate,
    config: &MomentumConfig,
) -> MovingAverageConvergence {
    if transactions.is_empty() {
        return MovingAverageConvergence {
            short_ma: 0.0,
            long_ma: 0.0,
            signal: MomentumSignal::Neutral,
        };
    }

    let short_ma = window_average(transactions, today, config.short_days);
    let long_ma = window_average(transactions, today, config.long_days);

    let diff = short_ma - long_ma;
    let signal = if diff > long_ma * config.band {
        MomentumSignal::Bearish
    } else if diff < -long_ma * config.band {
        MomentumSignal::Bullish
    } else {
        MomentumSignal::Neutral
    };

    MovingAverageConvergence {
        short_ma,
        long_ma,
        signal,
    }
}

/// Spend over the last `days` days (today included) divided by `days`
fn window_average(transactions: &[Transaction], today: NaiveDate, days: u32) -> f64 {
    if days == 0 {
        return 0.0;
    }
    let cutoff = today - Duration::days(days as i64);
    let total: f64 = transactions
        .iter()
        .filter(|tx| tx.date > cutoff)
        .map(|tx| tx.amount)
        .sum();
    total / days as f64
}
