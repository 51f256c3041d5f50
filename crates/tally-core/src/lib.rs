//! Tally Core Library
//!
//! Read-only analytics over a point-in-time snapshot of an expense log:
//! - Domain models (transactions, budgets, categories)
//! - Snapshot loading from the storage export format
//! - Analytics configuration with file overrides
//! - Period aggregation and budget status
//! - Forecasting (exponential smoothing, linear regression, moving averages)
//! - Volatility, anomaly, seasonal and comparison analytics
//! - Habit insights over classified and small-ticket spending

pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod period;
pub mod snapshot;

/// Builders for transactions and budgets used in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{AnalyticsEngine, AnalyticsReport};
pub use config::AnalyticsConfig;
pub use error::{Error, Result};
pub use models::{Budget, Category, Classification, RecurringFrequency, Transaction};
pub use period::{Periods, WeekStart};
pub use snapshot::Snapshot;
