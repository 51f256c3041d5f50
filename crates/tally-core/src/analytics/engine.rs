//! Analytics Engine - runs every analytics module over one snapshot

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::models::Transaction;
use crate::period::Periods;
use crate::snapshot::Snapshot;

use super::types::{
    AnomalyAlert, BudgetStatus, CategoryInsight, ExpenseStats, MovingAverageConvergence,
    PeriodComparison, PredictionResult, SeasonalPattern, SpendingImpact, SpendingInsight, StreakData,
    TrendAnalysis, VolatilityMetrics,
};
use super::{
    aggregate, anomaly, budget, comparison, forecast, insights, seasonal, streak, trend, volatility,
};

/// Every analytics result for one snapshot, computed against the same "now"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub generated_for: NaiveDate,
    pub transaction_count: usize,
    pub stats: ExpenseStats,
    pub forecast: PredictionResult,
    pub next_month_estimate: f64,
    pub trend: TrendAnalysis,
    pub volatility: VolatilityMetrics,
    pub anomalies: Vec<AnomalyAlert>,
    pub seasonal_patterns: Vec<SeasonalPattern>,
    pub month_over_month: PeriodComparison,
    pub year_over_year: PeriodComparison,
    pub category_insights: Vec<CategoryInsight>,
    pub momentum: MovingAverageConvergence,
    /// Current daily average projected over a month and a year
    pub impact: SpendingImpact,
    pub streak: StreakData,
    pub insights: Vec<SpendingInsight>,
}

/// Configured entry point for the analytics modules
///
/// Each module is also usable on its own as a free function; the engine only
/// supplies thresholds from `AnalyticsConfig` and a single captured "now".
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    /// Create an engine with the embedded default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Period boundaries for `today` using the configured week start
    pub fn periods(&self, today: NaiveDate) -> Periods {
        Periods::capture(today, self.config.week_start)
    }

    pub fn stats(&self, snapshot: &Snapshot, today: NaiveDate) -> ExpenseStats {
        aggregate::calculate_stats_for(
            &snapshot.transactions,
            &snapshot.budgets,
            &self.periods(today),
        )
    }

    pub fn budget_status(
        &self,
        snapshot: &Snapshot,
        today: NaiveDate,
    ) -> BTreeMap<String, BudgetStatus> {
        budget::check_budget_status(&snapshot.transactions, &snapshot.budgets, today)
    }

    pub fn forecast(&self, transactions: &[Transaction]) -> PredictionResult {
        forecast::exponential_smoothing_with(transactions, &self.config.forecast)
    }

    pub fn next_month_estimate(&self, transactions: &[Transaction], today: NaiveDate) -> f64 {
        forecast::predict_next_month_spending(
            transactions,
            today,
            self.config.forecast.lookback_months,
        )
    }

    pub fn trend(&self, transactions: &[Transaction]) -> TrendAnalysis {
        trend::linear_regression_with(transactions, &self.config.regression)
    }

    pub fn volatility(&self, transactions: &[Transaction]) -> VolatilityMetrics {
        volatility::calculate_volatility_with(transactions, &self.config.volatility)
    }

    pub fn anomalies(&self, transactions: &[Transaction]) -> Vec<AnomalyAlert> {
        anomaly::detect_anomalies_with(transactions, &self.config.anomaly)
    }

    pub fn seasonal_patterns(&self, transactions: &[Transaction]) -> Vec<SeasonalPattern> {
        seasonal::detect_seasonal_patterns(transactions)
    }

    pub fn month_over_month(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> PeriodComparison {
        comparison::month_over_month_for(transactions, &self.periods(today))
    }

    pub fn year_over_year(&self, transactions: &[Transaction], today: NaiveDate) -> PeriodComparison {
        comparison::year_over_year_for(transactions, &self.periods(today))
    }

    pub fn category_insights(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Vec<CategoryInsight> {
        comparison::category_insights_for(
            transactions,
            &self.periods(today),
            self.config.category_trend_band,
        )
    }

    pub fn momentum(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> MovingAverageConvergence {
        forecast::moving_average_convergence(transactions, today, &self.config.momentum)
    }

    pub fn streak(&self, transactions: &[Transaction], today: NaiveDate) -> StreakData {
        streak::calculate_streak(transactions, today)
    }

    pub fn insights(&self, transactions: &[Transaction]) -> Vec<SpendingInsight> {
        insights::generate_insights_with(transactions, &self.config.insights)
    }

    /// Run every module against `snapshot` as of `today`
    pub fn report(&self, snapshot: &Snapshot, today: NaiveDate) -> AnalyticsReport {
        let periods = self.periods(today);
        let txs = snapshot.transactions.as_slice();

        let stats = aggregate::calculate_stats_for(txs, &snapshot.budgets, &periods);
        tracing::debug!(module = "stats", total = stats.total, "Analytics module complete");

        let forecast = self.forecast(txs);
        let next_month_estimate = self.next_month_estimate(txs, today);
        tracing::debug!(
            module = "forecast",
            value = forecast.value,
            next_month_estimate,
            "Analytics module complete"
        );

        let trend = self.trend(txs);
        tracing::debug!(module = "trend", slope = trend.slope, "Analytics module complete");

        let volatility = self.volatility(txs);
        tracing::debug!(
            module = "volatility",
            cv = volatility.coefficient_of_variation,
            "Analytics module complete"
        );

        let anomalies = self.anomalies(txs);
        tracing::debug!(module = "anomaly", count = anomalies.len(), "Analytics module complete");

        let seasonal_patterns = self.seasonal_patterns(txs);
        tracing::debug!(
            module = "seasonal",
            days = seasonal_patterns.len(),
            "Analytics module complete"
        );

        let month_over_month = comparison::month_over_month_for(txs, &periods);
        let year_over_year = comparison::year_over_year_for(txs, &periods);
        let category_insights =
            comparison::category_insights_for(txs, &periods, self.config.category_trend_band);
        tracing::debug!(
            module = "comparison",
            categories = category_insights.len(),
            "Analytics module complete"
        );

        let momentum = self.momentum(txs, today);
        let impact = aggregate::calculate_impact(stats.average_daily);
        let streak = self.streak(txs, today);

        let insights = self.insights(txs);
        tracing::debug!(module = "insights", count = insights.len(), "Analytics module complete");

        tracing::info!(
            transactions = txs.len(),
            anomalies = anomalies.len(),
            today = %today,
            "Analytics report generated"
        );

        AnalyticsReport {
            generated_for: today,
            transaction_count: txs.len(),
            stats,
            forecast,
            next_month_estimate,
            trend,
            volatility,
            anomalies,
            seasonal_patterns,
            month_over_month,
            year_over_year,
            category_insights,
            momentum,
            impact,
            streak,
            insights,
        }
    }
}
