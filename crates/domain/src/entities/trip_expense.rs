//! Trip expense entity - Itemized spending attached to a trip

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Category used when none (or a blank one) is given
pub const DEFAULT_EXPENSE_CATEGORY: &str = "other";

/// A single itemized expense recorded on a trip
///
/// Expenses are informational; the cost engine works on the aggregate
/// figures in [`crate::TripParameters`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TripExpense {
    /// Free-form category label
    #[serde(default = "default_category", deserialize_with = "deserialize_category")]
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub category: String,

    /// Optional note
    #[serde(default, deserialize_with = "deserialize_description")]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub description: Option<String>,

    /// Amount spent, never negative
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
}

impl TripExpense {
    /// Create a new expense, normalizing its fields
    #[must_use]
    pub fn new(category: &str, description: Option<&str>, amount: f64) -> Self {
        Self {
            category: normalize_category(category),
            description: description.map(|d| d.trim().to_string()),
            amount: clamp_amount(amount),
        }
    }
}

fn default_category() -> String {
    DEFAULT_EXPENSE_CATEGORY.to_string()
}

fn normalize_category(category: &str) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        default_category()
    } else {
        trimmed.to_string()
    }
}

fn clamp_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

fn deserialize_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_category(raw.as_deref().unwrap_or_default()))
}

fn deserialize_description<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|d| d.trim().to_string()))
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(clamp_amount(raw.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_category_falls_back_to_other() {
        let e = TripExpense::new("   ", None, 10.0);
        assert_eq!(e.category, "other");
    }

    #[test]
    fn fields_are_trimmed_and_clamped() {
        let e = TripExpense::new("  fuel ", Some("  Orlen A2 "), -3.0);
        assert_eq!(e.category, "fuel");
        assert_eq!(e.description.as_deref(), Some("Orlen A2"));
        assert_eq!(e.amount, 0.0);
    }

    #[test]
    fn deserializes_with_defaults() {
        let e: TripExpense = serde_json::from_str("{}").unwrap();
        assert_eq!(e.category, "other");
        assert!(e.description.is_none());
        assert_eq!(e.amount, 0.0);

        let e: TripExpense =
            serde_json::from_str(r#"{"category": " parking ", "amount": -1}"#).unwrap();
        assert_eq!(e.category, "parking");
        assert_eq!(e.amount, 0.0);
    }

    #[test]
    fn overlong_category_fails_validation() {
        let e = TripExpense::new(&"x".repeat(51), None, 1.0);
        assert!(e.validate().is_err());
        assert!(TripExpense::new("food", None, 1.0).validate().is_ok());
    }
}
