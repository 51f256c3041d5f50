//! Budget evaluator
//!
//! Spend vs limit for each active budget over the current calendar month.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{normalize_category, Budget, Transaction};
use crate::period::{end_of_month, start_of_month, within};

use super::types::BudgetStatus;

/// Status of every active budget for the month containing `today`
///
/// Keyed by the budget's category label. Active budgets with no matching
/// spend still get a zero entry; inactive budgets get none.
pub fn check_budget_status(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
) -> BTreeMap<String, BudgetStatus> {
    let month_start = start_of_month(today);
    let month_end = end_of_month(today);

    let mut status = BTreeMap::new();

    for budget in budgets.iter().filter(|b| b.is_active) {
        let key = normalize_category(&budget.category);
        let spent: f64 = transactions
            .iter()
            .filter(|tx| {
                normalize_category(&tx.category) == key
                    && within(tx.date, month_start, month_end)
            })
            .map(|tx| tx.amount)
            .sum();

        status.insert(budget.category.clone(), evaluate(budget, spent));
    }

    tracing::debug!(
        budgets = budgets.len(),
        active = status.len(),
        "Budget status computed"
    );

    status
}

/// Derive the status record for a known spend
pub fn evaluate(budget: &Budget, spent: f64) -> BudgetStatus {
    BudgetStatus {
        spent,
        limit: budget.monthly_limit,
        percentage: spent / budget.monthly_limit * 100.0,
        is_over_budget: spent > budget.monthly_limit,
        remaining: (budget.monthly_limit - spent).max(0.0),
    }
}

/// Whether the active budget for `category` has reached its alert threshold
pub fn should_show_budget_alert(
    category: &str,
    budgets: &[Budget],
    transactions: &[Transaction],
    today: NaiveDate,
) -> bool {
    let Some(budget) = budgets.iter().find(|b| b.is_active && b.matches(category)) else {
        return false;
    };

    check_budget_status(transactions, std::slice::from_ref(budget), today)
        .get(&budget.category)
        .is_some_and(|status| status.percentage >= budget.alert_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, tx};

    fn today() -> NaiveDate {
        date("2024-03-14")
    }

    #[test]
    fn test_over_budget() {
        let txs = vec![
            tx("1", 700.0, "Food", "2024-03-02"),
            tx("2", 500.0, "food ", "2024-03-10"),
        ];
        let budgets = vec![Budget::new("Food", 1000.0)];

        let status = check_budget_status(&txs, &budgets, today());
        let food = &status["Food"];
        assert_eq!(food.spent, 1200.0);
        assert!(food.is_over_budget);
        assert_eq!(food.remaining, 0.0);
        assert!((food.percentage - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_only_current_month_counts() {
        let txs = vec![
            tx("1", 100.0, "Food", "2024-02-29"),
            tx("2", 50.0, "Food", "2024-03-31"),
            tx("3", 25.0, "Food", "2024-04-01"),
        ];
        let budgets = vec![Budget::new("Food", 200.0)];

        let status = check_budget_status(&txs, &budgets, today());
        // Later days of the current month are included, other months are not
        assert_eq!(status["Food"].spent, 50.0);
        assert_eq!(status["Food"].remaining, 150.0);
        assert!(!status["Food"].is_over_budget);
    }

    #[test]
    fn test_zero_spend_and_inactive() {
        let budgets = vec![
            Budget::new("Travel", 300.0),
            Budget::new("Shopping", 300.0).inactive(),
        ];

        let status = check_budget_status(&[], &budgets, today());
        assert_eq!(status.len(), 1);
        let travel = &status["Travel"];
        assert_eq!(travel.spent, 0.0);
        assert_eq!(travel.percentage, 0.0);
        assert_eq!(travel.remaining, 300.0);
        assert!(!status.contains_key("Shopping"));
    }

    #[test]
    fn test_budget_alert_threshold() {
        let txs = vec![tx("1", 85.0, "Food", "2024-03-05")];
        let budgets = vec![Budget::new("Food", 100.0).with_alert_threshold(80.0)];

        assert!(should_show_budget_alert("Food", &budgets, &txs, today()));
        assert!(should_show_budget_alert(" FOOD", &budgets, &txs, today()));
        assert!(!should_show_budget_alert("Bills", &budgets, &txs, today()));

        let strict = vec![Budget::new("Food", 100.0).with_alert_threshold(90.0)];
        assert!(!should_show_budget_alert("Food", &strict, &txs, today()));

        let inactive = vec![Budget::new("Food", 100.0).inactive()];
        assert!(!should_show_budget_alert("Food", &inactive, &txs, today()));
    }
}
