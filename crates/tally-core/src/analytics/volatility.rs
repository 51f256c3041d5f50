//! Spending volatility and consistency

use crate::config::VolatilityConfig;
use crate::models::Transaction;

use super::stats::{mean, standard_deviation};
use super::types::{Level, VolatilityMetrics};

/// Score spending consistency with the default CV cutoffs
pub fn calculate_volatility(transactions: &[Transaction]) -> VolatilityMetrics {
    calculate_volatility_with(transactions, &VolatilityConfig::default())
}

/// Coefficient-of-variation based consistency score
///
/// A CV of 0 scores 100; a CV of 1 or more scores 0. An empty log has no
/// spending to be consistent about and scores 0.
pub fn calculate_volatility_with(
    transactions: &[Transaction],
    config: &VolatilityConfig,
) -> VolatilityMetrics {
    if transactions.is_empty() {
        return VolatilityMetrics {
            standard_deviation: 0.0,
            coefficient_of_variation: 0.0,
            consistency_score: 0.0,
            volatility_level: Level::Low,
        };
    }

    let amounts: Vec<f64> = transactions.iter().map(|tx| tx.amount).collect();
    let avg = mean(&amounts);
    let std = standard_deviation(&amounts);

    let cv = if avg == 0.0 { 0.0 } else { std / avg };
    let consistency_score = (100.0 * (1.0 - cv.min(1.0))).clamp(0.0, 100.0);

    let volatility_level = if cv < config.low_cv {
        Level::Low
    } else if cv < config.medium_cv {
        Level::Medium
    } else {
        Level::High
    };

    VolatilityMetrics {
        standard_deviation: std,
        coefficient_of_variation: cv,
        consistency_score,
        volatility_level,
    }
}
