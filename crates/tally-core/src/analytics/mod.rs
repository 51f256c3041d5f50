//! Analytics - statistics over a transaction snapshot
//!
//! Every module is a pure function of the transactions (and budgets) it is
//! handed plus an explicit "today". Nothing here performs I/O or keeps state
//! between calls; callers re-run the analysis after any data change.
//!
//! ## Modules
//!
//! - **stats** - mean, population standard deviation, z-score
//! - **aggregate** - period totals, per-category sums, running averages
//! - **budget** - spend vs limit for the current month
//! - **forecast** - level + trend smoothing over monthly totals, moving averages
//! - **trend** - least-squares regression over the raw series
//! - **volatility** - coefficient-of-variation consistency score
//! - **anomaly** - z-score outliers
//! - **seasonal** - day-of-week averages
//! - **comparison** - month-over-month, year-over-year, per-category
//! - **streak** - consecutive logging days
//! - **insights** - rule-based habit observations (small purchases, waste, joy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::{AnalyticsEngine, Snapshot};
//!
//! let snapshot = Snapshot::load(Path::new("tally.json"))?;
//! let report = AnalyticsEngine::new().report(&snapshot, today);
//! ```

pub mod aggregate;
pub mod anomaly;
pub mod budget;
pub mod comparison;
pub mod engine;
pub mod forecast;
pub mod insights;
pub mod seasonal;
pub mod stats;
pub mod streak;
pub mod trend;
pub mod types;
pub mod volatility;

pub use aggregate::{calculate_impact, calculate_stats, calculate_stats_for, transactions_in_last_days};
pub use anomaly::{detect_anomalies, detect_anomalies_with};
pub use budget::{check_budget_status, should_show_budget_alert};
pub use comparison::{category_insights, compare, month_over_month, year_over_year};
pub use engine::{AnalyticsEngine, AnalyticsReport};
pub use forecast::{
    exponential_smoothing, exponential_smoothing_with, monthly_totals, moving_average_convergence,
    predict_next_month_spending,
};
pub use insights::{generate_insights, generate_insights_with};
pub use seasonal::{day_name, detect_seasonal_patterns};
pub use stats::{mean, standard_deviation, z_score};
pub use streak::calculate_streak;
pub use trend::{linear_regression, linear_regression_with};
pub use types::{
    AnomalyAlert, BudgetStatus, CategoryInsight, CategoryTrend, ConfidenceInterval, ExpenseStats,
    ForecastMethod, InsightKind, Level, MomentumSignal, MovingAverageConvergence, PeriodComparison,
    PredictionResult, SeasonalPattern, SpendingImpact, SpendingInsight, StreakData, TrendAnalysis,
    TrendDirection, TrendStrength, VolatilityMetrics,
};
pub use volatility::{calculate_volatility, calculate_volatility_with};
