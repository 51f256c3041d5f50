//! Integration tests for tally-core
//!
//! These tests exercise the full load → analyze → serialize workflow through
//! the public API only.

use std::io::Write;

use chrono::NaiveDate;
use tally_core::{
    analytics::{self, Level, TrendDirection},
    AnalyticsConfig, AnalyticsEngine, Budget, Error, Snapshot, Transaction,
};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Export as written by the storage layer, "today" being 2024-03-14
/// - Food budget of 1000 overspent at 1200 this month
/// - Three months of history for smoothing
/// - One large electronics purchase
fn export_json() -> &'static str {
    r#"{
  "transactions": [
    {"id": "t1", "amount": 700, "description": "Groceries", "category": "Food", "date": "2024-03-02", "createdAt": 1709337600000},
    {"id": "t2", "amount": 500, "description": "Dinner out", "category": "food", "date": "2024-03-14", "createdAt": 1710374400000, "classification": "JOY"},
    {"id": "t3", "amount": 40, "category": "Transport", "date": "2024-03-11", "isRecurring": true, "recurringFrequency": "weekly"},
    {"id": "t4", "amount": 900, "category": "Food", "date": "2024-02-10"},
    {"id": "t5", "amount": 60, "category": "Transport", "date": "2024-02-12"},
    {"id": "t6", "amount": 800, "category": "Food", "date": "2024-01-09"},
    {"id": "t7", "amount": 2400, "description": "Laptop", "category": "Shopping", "date": "2024-01-20", "tags": ["work"]},
    {"id": "t8", "amount": 650, "category": "Food", "date": "2023-03-05"}
  ],
  "budgets": [
    {"id": "b1", "category": "Food", "monthlyLimit": 1000, "alertThreshold": 80, "isActive": true, "createdAt": 0},
    {"id": "b2", "category": "Shopping", "monthlyLimit": 300, "isActive": false}
  ]
}"#
}

fn today() -> NaiveDate {
    day("2024-03-14")
}

// =============================================================================
// Snapshot Loading
// =============================================================================

#[test]
fn test_load_export_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(export_json().as_bytes()).unwrap();

    let snapshot = Snapshot::load(file.path()).expect("export should load");
    assert_eq!(snapshot.transactions.len(), 8);
    assert_eq!(snapshot.budgets.len(), 2);
    // No categories in the export: defaults are filled in
    assert!(!snapshot.categories.is_empty());
}

#[test]
fn test_bare_transaction_list() {
    let json = r#"[{"id": "a", "amount": 12.5, "category": "Food", "date": "2024-03-01"}]"#;
    let snapshot = Snapshot::from_json(json).unwrap();
    assert_eq!(snapshot.transactions.len(), 1);
    assert!(snapshot.budgets.is_empty());
}

#[test]
fn test_missing_snapshot_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = Snapshot::load(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_negative_amount_rejected() {
    let json = r#"[{"id": "a", "amount": -5, "category": "Food", "date": "2024-03-01"}]"#;
    assert!(matches!(
        Snapshot::from_json(json),
        Err(Error::InvalidData(_))
    ));
}

// =============================================================================
// Analytics Workflow
// =============================================================================

#[test]
fn test_overspent_budget_end_to_end() {
    let snapshot = Snapshot::from_json(export_json()).unwrap();
    let stats = analytics::calculate_stats(&snapshot.transactions, &snapshot.budgets, today());

    let food = &stats.budget_status["Food"];
    assert_eq!(food.spent, 1200.0);
    assert!((food.percentage - 120.0).abs() < 1e-9);
    assert!(food.is_over_budget);
    assert_eq!(food.remaining, 0.0);
    // Inactive budgets are not evaluated
    assert!(!stats.budget_status.contains_key("Shopping"));

    assert!(analytics::should_show_budget_alert(
        "food",
        &snapshot.budgets,
        &snapshot.transactions,
        today()
    ));
}

#[test]
fn test_stats_totals() {
    let snapshot = Snapshot::from_json(export_json()).unwrap();
    let stats = analytics::calculate_stats(&snapshot.transactions, &snapshot.budgets, today());

    assert_eq!(stats.total, 6050.0);
    assert_eq!(stats.today, 500.0);
    assert_eq!(stats.this_month, 1240.0);
    assert_eq!(stats.last_month, 960.0);
    assert_eq!(stats.year_to_date, 5400.0);

    let by_category: f64 = stats.by_category.values().sum();
    assert!((by_category - stats.total).abs() < 1e-9);
    // Categories are free-text: "food" and "Food" are separate buckets
    assert_eq!(stats.by_category["food"], 500.0);
}

#[test]
fn test_large_purchase_flagged() {
    let snapshot = Snapshot::from_json(export_json()).unwrap();
    let anomalies = analytics::detect_anomalies(&snapshot.transactions, 2.0);

    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].transaction.id, "t7");
    assert!(anomalies[0].z_score > 2.0);
    assert_eq!(anomalies[0].severity, Level::Low);
}

#[test]
fn test_comparisons() {
    let snapshot = Snapshot::from_json(export_json()).unwrap();

    let mom = analytics::month_over_month(&snapshot.transactions, today());
    assert_eq!(mom.current, 1240.0);
    assert_eq!(mom.previous, 960.0);
    assert!((mom.change_percent - 280.0 / 960.0 * 100.0).abs() < 1e-9);

    let yoy = analytics::year_over_year(&snapshot.transactions, today());
    assert_eq!(yoy.current, 5400.0);
    assert_eq!(yoy.previous, 650.0);
}

#[test]
fn test_forecast_uses_monthly_totals() {
    let snapshot = Snapshot::from_json(export_json()).unwrap();
    let months = analytics::monthly_totals(&snapshot.transactions);
    let keys: Vec<&str> = months.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["2023-03", "2024-01", "2024-02", "2024-03"]);

    let prediction = analytics::exponential_smoothing(&snapshot.transactions);
    assert!(prediction.value >= 0.0);
    assert!(prediction.confidence_interval.lower <= prediction.value);
    assert!(prediction.confidence_interval.upper >= prediction.value);
    assert!((0.0..=1.0).contains(&prediction.accuracy));
}

#[test]
fn test_report_survives_json() {
    let snapshot = Snapshot::from_json(export_json()).unwrap();
    let report = AnalyticsEngine::new().report(&snapshot, today());

    let json = serde_json::to_string(&report).unwrap();
    let parsed: tally_core::AnalyticsReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.generated_for, report.generated_for);
    assert_eq!(parsed.transaction_count, 8);
    assert_eq!(parsed.anomalies.len(), report.anomalies.len());
    assert_eq!(parsed.stats.by_category, report.stats.by_category);
    assert_eq!(report.streak.current_streak, 1);
    assert_eq!(report.category_insights[0].category, "Food");
}

#[test]
fn test_engine_respects_config_file() {
    let config = AnalyticsConfig::from_toml(
        r#"
[calendar]
week_start = "monday"

[regression]
slope_threshold = 1000.0
"#,
    )
    .unwrap();
    let engine = AnalyticsEngine::with_config(config);

    let txs = vec![
        Transaction::new("1", 100.0, "Food", day("2024-01-01")),
        Transaction::new("2", 200.0, "Food", day("2024-01-11")),
    ];
    // Slope of 10/day is under the configured threshold
    assert_eq!(engine.trend(&txs).direction, TrendDirection::Stable);
    assert_eq!(
        analytics::linear_regression(&txs).direction,
        TrendDirection::Increasing
    );
}

#[test]
fn test_budget_join_is_case_insensitive() {
    let txs = vec![Transaction::new("1", 90.0, " FOOD ", today())];
    let budgets = vec![Budget::new("food", 100.0)];
    let status = analytics::check_budget_status(&txs, &budgets, today());
    assert_eq!(status["food"].spent, 90.0);
    assert!(analytics::should_show_budget_alert("Food", &budgets, &txs, today()));
}

#[test]
fn test_classified_spend_surfaces_in_report() {
    let snapshot = Snapshot::from_json(export_json()).unwrap();
    let report = AnalyticsEngine::new().report(&snapshot, today());

    // Only the dinner out is classified; nothing else crosses a habit threshold
    assert_eq!(report.insights.len(), 1);
    assert_eq!(report.insights[0].kind, analytics::InsightKind::Joy);
    assert_eq!(report.insights[0].total, 500.0);
    assert_eq!(report.insights[0].count, 1);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["insights"][0]["kind"], "joy");
}
