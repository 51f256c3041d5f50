//! Anomaly detection
//!
//! Flags transactions whose amount lies far from the mean of all amounts,
//! measured in population standard deviations.

use crate::config::AnomalyConfig;
use crate::models::Transaction;

use super::stats::z_scores;
use super::types::{AnomalyAlert, Level};

/// Minimum transactions before outlier detection is meaningful
pub const MIN_TRANSACTIONS: usize = 3;

/// Flag transactions whose |z-score| exceeds `threshold`
pub fn detect_anomalies(transactions: &[Transaction], threshold: f64) -> Vec<AnomalyAlert> {
    detect_anomalies_with(transactions, &AnomalyConfig::with_threshold(threshold))
}

/// Flag outliers, most anomalous first
pub fn detect_anomalies_with(
    transactions: &[Transaction],
    config: &AnomalyConfig,
) -> Vec<AnomalyAlert> {
    if transactions.len() < MIN_TRANSACTIONS {
        return vec![];
    }

    let amounts: Vec<f64> = transactions.iter().map(|tx| tx.amount).collect();
    let scores = z_scores(&amounts);

    let mut anomalies: Vec<AnomalyAlert> = transactions
        .iter()
        .zip(scores)
        .filter(|(_, z)| z.abs() > config.threshold)
        .map(|(tx, z)| AnomalyAlert {
            transaction: tx.clone(),
            z_score: z,
            severity: severity_for(z.abs(), config),
            reason: reason_for(z),
        })
        .collect();

    anomalies.sort_by(|a, b| {
        b.z_score
            .abs()
            .partial_cmp(&a.z_score.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    tracing::debug!(
        transactions = transactions.len(),
        flagged = anomalies.len(),
        threshold = config.threshold,
        "Anomaly detection complete"
    );

    anomalies
}

fn severity_for(abs_z: f64, config: &AnomalyConfig) -> Level {
    if abs_z > config.high_z {
        Level::High
    } else if abs_z > config.medium_z {
        Level::Medium
    } else {
        Level::Low
    }
}

fn reason_for(z: f64) -> String {
    if z > 0.0 {
        format!("Unusually high spending ({:.1}σ above average)", z.abs())
    } else {
        format!("Unusually low spending ({:.1}σ below average)", z.abs())
    }
}
