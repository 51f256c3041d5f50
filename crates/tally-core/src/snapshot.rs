//! Point-in-time snapshot of the expense store
//!
//! Storage hands the analytics core a snapshot by value. Records are
//! validated once here so the analytics modules never see non-finite or
//! negative amounts.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{default_categories, Budget, Category, Transaction};

/// Everything the analytics core reads in one computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Accepted export shapes: a full data export or a bare transaction list
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Full(Snapshot),
    Transactions(Vec<Transaction>),
}

impl Snapshot {
    pub fn new(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Self {
        Self {
            transactions,
            budgets,
            categories: Vec::new(),
        }
    }

    /// Parse and validate a JSON export
    pub fn from_json(content: &str) -> Result<Self> {
        let mut snapshot = match serde_json::from_str::<SnapshotFile>(content) {
            Ok(SnapshotFile::Full(snapshot)) => snapshot,
            Ok(SnapshotFile::Transactions(transactions)) => Self::new(transactions, Vec::new()),
            // Re-parse as the full shape for a precise error location
            Err(_) => serde_json::from_str::<Snapshot>(content)?,
        };

        if snapshot.categories.is_empty() {
            snapshot.categories = default_categories();
        }

        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Read and validate a JSON export from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(format!(
                "Snapshot file {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;

        tracing::info!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            "Loaded snapshot"
        );

        Ok(snapshot)
    }

    /// Reject records the analytics cannot interpret
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for tx in &self.transactions {
            if !tx.amount.is_finite() {
                return Err(Error::InvalidData(format!(
                    "Transaction {} has a non-numeric amount",
                    tx.id
                )));
            }
            if tx.amount < 0.0 {
                return Err(Error::InvalidData(format!(
                    "Transaction {} has a negative amount ({})",
                    tx.id, tx.amount
                )));
            }
            if tx.category.trim().is_empty() {
                return Err(Error::InvalidData(format!(
                    "Transaction {} has no category",
                    tx.id
                )));
            }
            if !seen.insert(tx.id.as_str()) {
                tracing::warn!(id = %tx.id, "Duplicate transaction id in snapshot");
            }
        }

        for budget in &self.budgets {
            if !(budget.monthly_limit.is_finite() && budget.monthly_limit > 0.0) {
                return Err(Error::InvalidData(format!(
                    "Budget for {} must have a positive monthly limit",
                    budget.category
                )));
            }
            if !(1.0..=100.0).contains(&budget.alert_threshold) {
                return Err(Error::InvalidData(format!(
                    "Budget for {} has alert threshold {} outside 1-100",
                    budget.category, budget.alert_threshold
                )));
            }
        }

        Ok(())
    }

    /// Transaction categories with no matching known category
    pub fn unknown_categories(&self) -> Vec<String> {
        let known: HashSet<String> = self
            .categories
            .iter()
            .map(|c| c.name.trim().to_lowercase())
            .collect();

        let mut unknown: Vec<String> = self
            .transactions
            .iter()
            .filter(|tx| !known.contains(&tx.category.trim().to_lowercase()))
            .map(|tx| tx.category.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        unknown.sort();
        unknown
    }
}
