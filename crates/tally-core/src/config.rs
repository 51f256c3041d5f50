//! Analytics configuration
//!
//! Every tunable constant used by the analytics modules lives here. Defaults
//! match the built-in behavior; a TOML file can override any subset.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/tally/config/analytics.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::period::WeekStart;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Exponential smoothing and simple prediction settings
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    /// Level smoothing constant
    pub alpha: f64,
    /// Trend smoothing constant
    pub beta: f64,
    /// Trend magnitude separating increasing/decreasing from stable
    pub trend_epsilon: f64,
    /// Months averaged by `predict_next_month_spending`
    pub lookback_months: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.1,
            trend_epsilon: 0.05,
            lookback_months: 3,
        }
    }
}

/// Linear regression labelling thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionConfig {
    /// Slope in currency per day
    pub slope_threshold: f64,
    pub strong_r_squared: f64,
    pub moderate_r_squared: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            slope_threshold: 5.0,
            strong_r_squared: 0.7,
            moderate_r_squared: 0.4,
        }
    }
}

/// Coefficient-of-variation cutoffs
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityConfig {
    pub low_cv: f64,
    pub medium_cv: f64,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            low_cv: 0.3,
            medium_cv: 0.7,
        }
    }
}

/// Z-score outlier settings
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyConfig {
    /// Absolute z-score a transaction must exceed to be flagged
    pub threshold: f64,
    pub medium_z: f64,
    pub high_z: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            threshold: 2.0,
            medium_z: 2.5,
            high_z: 3.0,
        }
    }
}

impl AnomalyConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

/// Short vs long moving average settings
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumConfig {
    pub short_days: u32,
    pub long_days: u32,
    /// Fraction of the long average the difference must exceed
    pub band: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            short_days: 7,
            long_days: 30,
            band: 0.1,
        }
    }
}

/// Rule thresholds for spending habit insights
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    /// Transactions below this amount count as small purchases
    pub small_amount: f64,
    /// Small purchases needed (exclusive) before they are reported
    pub small_count: usize,
    /// Entries in one category needed (exclusive) before a budget is suggested
    pub frequent_count: usize,
    /// Multiplier applied to a frequent category's total for the suggested limit
    pub budget_headroom: f64,
    /// Case-insensitive substring marking everyday categories
    pub habit_keyword: String,
    /// Average per transaction below which an everyday category is a habit
    pub habit_average: f64,
    /// Most insights returned
    pub limit: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            small_amount: 100.0,
            small_count: 10,
            frequent_count: 20,
            budget_headroom: 1.1,
            habit_keyword: "food".to_string(),
            habit_average: 50.0,
            limit: 3,
        }
    }
}

/// Complete analytics configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
    pub week_start: WeekStart,
    pub forecast: ForecastConfig,
    pub regression: RegressionConfig,
    pub volatility: VolatilityConfig,
    pub anomaly: AnomalyConfig,
    pub momentum: MomentumConfig,
    pub insights: InsightConfig,
    /// Fractional change vs last month before a category trends up/down
    pub category_trend_band: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Sunday,
            forecast: ForecastConfig::default(),
            regression: RegressionConfig::default(),
            volatility: VolatilityConfig::default(),
            anomaly: AnomalyConfig::default(),
            momentum: MomentumConfig::default(),
            insights: InsightConfig::default(),
            category_trend_band: 0.1,
        }
    }
}

impl AnalyticsConfig {
    /// Load using the override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path (embedded defaults if it does not exist)
    pub fn from_path(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse a TOML document overlaid onto the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Reject values that would make the analytics meaningless
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, v: f64| {
            if v > 0.0 && v <= 1.0 {
                Ok(())
            } else {
                Err(Error::Config(format!("{} must be in (0, 1], got {}", name, v)))
            }
        };
        let positive = |name: &str, v: f64| {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(Error::Config(format!("{} must be positive, got {}", name, v)))
            }
        };

        unit("forecast.alpha", self.forecast.alpha)?;
        unit("forecast.beta", self.forecast.beta)?;
        positive("forecast.trend_epsilon", self.forecast.trend_epsilon)?;
        positive("regression.slope_threshold", self.regression.slope_threshold)?;
        unit("regression.strong_r_squared", self.regression.strong_r_squared)?;
        unit("regression.moderate_r_squared", self.regression.moderate_r_squared)?;
        positive("volatility.low_cv", self.volatility.low_cv)?;
        positive("volatility.medium_cv", self.volatility.medium_cv)?;
        positive("anomaly.threshold", self.anomaly.threshold)?;
        positive("anomaly.medium_z", self.anomaly.medium_z)?;
        positive("anomaly.high_z", self.anomaly.high_z)?;
        positive("momentum.band", self.momentum.band)?;
        positive("categories.trend_band", self.category_trend_band)?;
        positive("insights.small_amount", self.insights.small_amount)?;
        positive("insights.budget_headroom", self.insights.budget_headroom)?;
        positive("insights.habit_average", self.insights.habit_average)?;

        if self.forecast.lookback_months == 0 {
            return Err(Error::Config(
                "forecast.lookback_months must be at least 1".to_string(),
            ));
        }
        if self.momentum.short_days == 0 || self.momentum.long_days == 0 {
            return Err(Error::Config(
                "momentum periods must be at least 1 day".to_string(),
            ));
        }
        if self.insights.habit_keyword.trim().is_empty() {
            return Err(Error::Config(
                "insights.habit_keyword must not be empty".to_string(),
            ));
        }
        if self.regression.moderate_r_squared > self.regression.strong_r_squared {
            return Err(Error::Config(
                "regression.moderate_r_squared exceeds strong_r_squared".to_string(),
            ));
        }
        if self.volatility.low_cv > self.volatility.medium_cv {
            return Err(Error::Config(
                "volatility.low_cv exceeds medium_cv".to_string(),
            ));
        }

        Ok(())
    }
}

/// Get the default override path for the analytics config
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("analytics.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<AnalyticsConfig> {
    let candidate = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match candidate {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading analytics config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        Some(path) => {
            if override_path.is_some() {
                tracing::warn!(
                    path = %path.display(),
                    "Config file not found, using built-in defaults"
                );
            }
            DEFAULT_CONFIG.to_string()
        }
        None => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    calendar: Option<RawCalendar>,
    forecast: Option<RawForecast>,
    regression: Option<RawRegression>,
    volatility: Option<RawVolatility>,
    anomaly: Option<RawAnomaly>,
    momentum: Option<RawMomentum>,
    categories: Option<RawCategories>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Deserialize)]
struct RawCalendar {
    week_start: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    alpha: Option<f64>,
    beta: Option<f64>,
    trend_epsilon: Option<f64>,
    lookback_months: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawRegression {
    slope_threshold: Option<f64>,
    strong_r_squared: Option<f64>,
    moderate_r_squared: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawVolatility {
    low_cv: Option<f64>,
    medium_cv: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawAnomaly {
    threshold: Option<f64>,
    medium_z: Option<f64>,
    high_z: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawMomentum {
    short_days: Option<u32>,
    long_days: Option<u32>,
    band: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    trend_band: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    small_amount: Option<f64>,
    small_count: Option<usize>,
    frequent_count: Option<usize>,
    budget_headroom: Option<f64>,
    habit_keyword: Option<String>,
    habit_average: Option<f64>,
    limit: Option<usize>,
}

fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(calendar) = raw.calendar {
        if let Some(week_start) = calendar.week_start {
            config.week_start = week_start.parse::<WeekStart>().map_err(Error::Config)?;
        }
    }

    if let Some(forecast) = raw.forecast {
        let f = &mut config.forecast;
        f.alpha = forecast.alpha.unwrap_or(f.alpha);
        f.beta = forecast.beta.unwrap_or(f.beta);
        f.trend_epsilon = forecast.trend_epsilon.unwrap_or(f.trend_epsilon);
        f.lookback_months = forecast.lookback_months.unwrap_or(f.lookback_months);
    }

    if let Some(regression) = raw.regression {
        let r = &mut config.regression;
        r.slope_threshold = regression.slope_threshold.unwrap_or(r.slope_threshold);
        r.strong_r_squared = regression.strong_r_squared.unwrap_or(r.strong_r_squared);
        r.moderate_r_squared = regression.moderate_r_squared.unwrap_or(r.moderate_r_squared);
    }

    if let Some(volatility) = raw.volatility {
        let v = &mut config.volatility;
        v.low_cv = volatility.low_cv.unwrap_or(v.low_cv);
        v.medium_cv = volatility.medium_cv.unwrap_or(v.medium_cv);
    }

    if let Some(anomaly) = raw.anomaly {
        let a = &mut config.anomaly;
        a.threshold = anomaly.threshold.unwrap_or(a.threshold);
        a.medium_z = anomaly.medium_z.unwrap_or(a.medium_z);
        a.high_z = anomaly.high_z.unwrap_or(a.high_z);
    }

    if let Some(momentum) = raw.momentum {
        let m = &mut config.momentum;
        m.short_days = momentum.short_days.unwrap_or(m.short_days);
        m.long_days = momentum.long_days.unwrap_or(m.long_days);
        m.band = momentum.band.unwrap_or(m.band);
    }

    if let Some(categories) = raw.categories {
        config.category_trend_band = categories.trend_band.unwrap_or(config.category_trend_band);
    }

    if let Some(insights) = raw.insights {
        let i = &mut config.insights;
        i.small_amount = insights.small_amount.unwrap_or(i.small_amount);
        i.small_count = insights.small_count.unwrap_or(i.small_count);
        i.frequent_count = insights.frequent_count.unwrap_or(i.frequent_count);
        i.budget_headroom = insights.budget_headroom.unwrap_or(i.budget_headroom);
        if let Some(keyword) = insights.habit_keyword {
            i.habit_keyword = keyword;
        }
        i.habit_average = insights.habit_average.unwrap_or(i.habit_average);
        i.limit = insights.limit.unwrap_or(i.limit);
    }

    config.validate()?;
    Ok(config)
}
