//! Domain models for Tally
//!
//! These records mirror the storage export format: camelCase field names,
//! dates as `YYYY-MM-DD`, timestamps as epoch milliseconds. The analytics
//! core only ever reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single logged expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Non-negative amount in the user's currency
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    /// Free-text category label; unknown categories form their own bucket
    pub category: String,
    /// Calendar date, interpreted in local time
    pub date: NaiveDate,
    /// Insertion timestamp (epoch millis), audit only
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_frequency: Option<RecurringFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_end_date: Option<NaiveDate>,
    /// Paused recurring templates generate no new instances
    #[serde(default)]
    pub is_paused: bool,
    /// Back-reference to the recurring template this instance was generated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_recurring_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Reference to an externally stored receipt image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
}

impl Transaction {
    /// Create a plain transaction with no optional metadata
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            description: String::new(),
            category: category.into(),
            date,
            created_at: 0,
            tags: Vec::new(),
            notes: None,
            classification: None,
            is_recurring: false,
            recurring_frequency: None,
            recurring_end_date: None,
            is_paused: false,
            parent_recurring_id: None,
            event: None,
            receipt_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    /// Whether this is a generated instance of a recurring template
    pub fn is_recurring_instance(&self) -> bool {
        self.parent_recurring_id.is_some()
    }
}

/// How the user judged an expense after the fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Essential,
    Joy,
    Waste,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essential => "ESSENTIAL",
            Self::Joy => "JOY",
            Self::Waste => "WASTE",
        }
    }
}

impl std::str::FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ESSENTIAL" => Ok(Self::Essential),
            "JOY" => Ok(Self::Joy),
            "WASTE" => Ok(Self::Waste),
            _ => Err(format!("Unknown classification: {}", s)),
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Repeat interval of a recurring template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurringFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for RecurringFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annual" => Ok(Self::Yearly),
            _ => Err(format!("Unknown recurring frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for RecurringFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A monthly spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub id: String,
    /// Join key against `Transaction::category` (case-insensitive, trimmed)
    pub category: String,
    pub monthly_limit: f64,
    /// Alert percentage, 1-100
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_alert_threshold() -> f64 {
    80.0
}

fn default_true() -> bool {
    true
}

impl Budget {
    pub fn new(category: impl Into<String>, monthly_limit: f64) -> Self {
        let category = category.into();
        Self {
            id: category.to_lowercase(),
            category,
            monthly_limit,
            alert_threshold: default_alert_threshold(),
            is_active: true,
            created_at: 0,
        }
    }

    pub fn with_alert_threshold(mut self, threshold: f64) -> Self {
        self.alert_threshold = threshold;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Whether a transaction category matches this budget's category
    pub fn matches(&self, category: &str) -> bool {
        normalize_category(&self.category) == normalize_category(category)
    }
}

/// Normalize a category label for joining budgets to transactions
pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// A user-visible category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    /// Built-in categories cannot be deleted
    #[serde(default)]
    pub is_default: bool,
}

/// The built-in categories every new ledger starts with
pub fn default_categories() -> Vec<Category> {
    [
        ("Food", "🍔", "#ef4444"),
        ("Transport", "🚗", "#3b82f6"),
        ("Shopping", "🛍️", "#a855f7"),
        ("Bills", "💳", "#f59e0b"),
        ("Entertainment", "🎬", "#ec4899"),
        ("Health", "🏥", "#10b981"),
        ("Education", "📚", "#6366f1"),
        ("Other", "📦", "#6b7280"),
    ]
    .into_iter()
    .map(|(name, icon, color)| Category {
        id: name.to_lowercase(),
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        is_default: true,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transaction_deserialize_camel_case() {
        let json = r#"{
            "id": "t1",
            "amount": 42.5,
            "category": "Food",
            "date": "2024-03-05",
            "createdAt": 1709600000000,
            "isRecurring": true,
            "recurringFrequency": "monthly",
            "classification": "JOY",
            "parentRecurringId": "tpl-1"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.amount, 42.5);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(tx.recurring_frequency, Some(RecurringFrequency::Monthly));
        assert_eq!(tx.classification, Some(Classification::Joy));
        assert!(tx.is_recurring_instance());
        assert!(!tx.is_paused);
        assert!(tx.tags.is_empty());
    }

    #[test]
    fn test_budget_defaults_and_matching() {
        let budget: Budget =
            serde_json::from_str(r#"{"category": " Food ", "monthlyLimit": 500}"#).unwrap();
        assert!(budget.is_active);
        assert_eq!(budget.alert_threshold, 80.0);
        assert!(budget.matches("food"));
        assert!(budget.matches("FOOD  "));
        assert!(!budget.matches("Foods"));
    }

    #[test]
    fn test_enum_round_trip_strings() {
        assert_eq!(
            Classification::from_str("waste").unwrap(),
            Classification::Waste
        );
        assert_eq!(
            RecurringFrequency::from_str("annual").unwrap(),
            RecurringFrequency::Yearly
        );
        assert!(RecurringFrequency::from_str("hourly").is_err());
        assert_eq!(Classification::Essential.to_string(), "ESSENTIAL");
    }

    #[test]
    fn test_default_categories() {
        let categories = default_categories();
        assert_eq!(categories.len(), 8);
        assert!(categories.iter().all(|c| c.is_default));
        assert!(categories.iter().any(|c| c.name == "Other"));
    }
}
