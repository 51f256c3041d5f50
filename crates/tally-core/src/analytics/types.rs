//! Result records produced by the analytics modules
//!
//! These are the contract between the analytics core and whatever renders
//! them: camelCase fields, lowercase labels.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Direction of a forecast or regression trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }

    /// Label a value against a symmetric dead band
    pub fn from_threshold(value: f64, threshold: f64) -> Self {
        if value > threshold {
            Self::Increasing
        } else if value < -threshold {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How well a regression line explains the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
}

impl TrendStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Three-level rating shared by volatility and anomaly severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown level: {}", s)),
        }
    }
}

/// Forecasting method that produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForecastMethod {
    ExponentialSmoothing,
    LinearRegression,
    MovingAverage,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExponentialSmoothing => "exponential-smoothing",
            Self::LinearRegression => "linear-regression",
            Self::MovingAverage => "moving-average",
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending momentum from short vs long moving averages
///
/// Named from the budget's point of view: rising spend is bearish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MomentumSignal {
    /// Spending is slowing down
    Bullish,
    /// Spending is speeding up
    Bearish,
    Neutral,
}

impl MomentumSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for MomentumSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Month-over-month movement of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryTrend {
    Up,
    Down,
    Stable,
}

impl CategoryTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for CategoryTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spend vs limit for one budget in the current month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    pub is_over_budget: bool,
    pub remaining: f64,
}

/// Period totals and averages over the whole log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub total: f64,
    pub today: f64,
    pub this_week: f64,
    pub this_month: f64,
    pub last_month: f64,
    pub year_to_date: f64,
    pub average_daily: f64,
    pub average_monthly: f64,
    pub by_category: BTreeMap<String, f64>,
    pub budget_status: BTreeMap<String, BudgetStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Next-month spending forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub value: f64,
    pub confidence_interval: ConfidenceInterval,
    pub method: ForecastMethod,
    /// 1 - MAPE, floored at 0
    pub accuracy: f64,
    pub trend: TrendDirection,
}

/// Least-squares fit of amount against days since the first transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub direction: TrendDirection,
    pub strength: TrendStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityMetrics {
    pub standard_deviation: f64,
    pub coefficient_of_variation: f64,
    /// 0-100, higher is more consistent
    pub consistency_score: f64,
    pub volatility_level: Level,
}

/// A transaction whose amount is a statistical outlier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyAlert {
    pub transaction: Transaction,
    pub z_score: f64,
    pub severity: Level,
    pub reason: String,
}

/// Average spend for one day of the week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalPattern {
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u32,
    pub average_spending: f64,
    /// Number of transactions on this weekday
    pub frequency: usize,
}

/// Current partial period vs the prior equivalent period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub current: f64,
    pub previous: f64,
    pub change: f64,
    /// 0 when there is no previous spend
    pub change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInsight {
    pub category: String,
    /// Current month-to-date spend
    pub total: f64,
    /// Share of all month-to-date spend
    pub percentage: f64,
    pub trend: CategoryTrend,
    pub average_per_transaction: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingAverageConvergence {
    #[serde(rename = "shortMA")]
    pub short_ma: f64,
    #[serde(rename = "longMA")]
    pub long_ma: f64,
    pub signal: MomentumSignal,
}

/// A daily amount projected over a month and a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendingImpact {
    pub monthly: f64,
    pub yearly: f64,
}

/// Which habit rule produced a spending insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    /// Many purchases under the small-amount cutoff
    SmallExpenses,
    /// Everyday category with a low average ticket
    DailyHabit,
    /// Category logged often enough to deserve its own budget
    FrequentCategory,
    /// Spend the user classified as waste
    Waste,
    /// Spend the user classified as joy
    Joy,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmallExpenses => "small-expenses",
            Self::DailyHabit => "daily-habit",
            Self::FrequentCategory => "frequent-category",
            Self::Waste => "waste",
            Self::Joy => "joy",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending habit worth pointing out, with the numbers behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingInsight {
    pub kind: InsightKind,
    /// Set for per-category rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Transactions matched by the rule
    pub count: usize,
    pub total: f64,
    /// Matched spend projected over a year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_impact: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_limit: Option<f64>,
}

/// Consecutive-day logging streaks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_log_date: Option<NaiveDate>,
    pub total_days: usize,
}
