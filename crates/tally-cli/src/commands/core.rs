//! Shared command utilities
//!
//! This module contains:
//! - `Context` - Everything a command needs: engine, snapshot and "today"
//! - `load_context` - Resolve config, snapshot and date from CLI flags
//! - `print_json` - Pretty JSON output for `--json`

use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tally_core::{AnalyticsConfig, AnalyticsEngine, Snapshot};

/// Inputs shared by every analytics command
pub struct Context {
    pub engine: AnalyticsEngine,
    pub snapshot: Snapshot,
    /// Captured once so every period boundary in one run agrees
    pub today: NaiveDate,
    pub json: bool,
}

impl Context {
    pub fn new(engine: AnalyticsEngine, snapshot: Snapshot, today: NaiveDate, json: bool) -> Self {
        Self {
            engine,
            snapshot,
            today,
            json,
        }
    }
}

pub fn load_context(
    snapshot_path: &Path,
    config_path: Option<&Path>,
    today: Option<&str>,
    json: bool,
) -> Result<Context> {
    let config = load_config(config_path)?;
    let today = resolve_today(today)?;

    let snapshot = Snapshot::load(snapshot_path)
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;

    let unknown = snapshot.unknown_categories();
    if !unknown.is_empty() {
        tracing::debug!(categories = ?unknown, "Transactions use categories outside the known list");
    }

    Ok(Context::new(
        AnalyticsEngine::with_config(config),
        snapshot,
        today,
        json,
    ))
}

/// Explicit config file, else the user override, else built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            AnalyticsConfig::from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => AnalyticsConfig::load().context("Failed to load analytics config"),
    }
}

/// Parse `--today`, defaulting to the local calendar date
pub fn resolve_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid --today date '{}' (use YYYY-MM-DD)", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
