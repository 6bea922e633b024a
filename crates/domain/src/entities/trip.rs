//! Trip entity - The user-entered record of travel cost inputs

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::TripExpense;
use crate::cost_engine::{CostResult, calculate};
use crate::errors::violation_messages;
use crate::value_objects::TripParameters;

/// A trip record as submitted by a client
///
/// The numeric fields are flattened into the record, so the wire format is
/// one flat object with `title`, the [`TripParameters`] fields, the optional
/// dates and an `expenses` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Trip {
    /// Short name of the trip
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: String,

    /// Cost inputs
    #[serde(flatten)]
    pub parameters: TripParameters,

    /// First day of travel
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Last day of travel
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Itemized expenses
    #[serde(default)]
    #[validate(nested)]
    pub expenses: Vec<TripExpense>,
}

impl Trip {
    /// Create a trip without dates or expenses
    #[must_use]
    pub fn new(title: &str, parameters: TripParameters) -> Self {
        Self {
            title: title.trim().to_string(),
            parameters,
            start_date: None,
            end_date: None,
            expenses: Vec::new(),
        }
    }

    /// Append an expense
    #[must_use]
    pub fn with_expense(mut self, expense: TripExpense) -> Self {
        self.expenses.push(expense);
        self
    }

    /// Derived cost figures for this trip
    #[must_use]
    pub fn cost(&self) -> CostResult {
        calculate(&self.parameters)
    }

    /// Sum of the itemized expense amounts
    #[must_use]
    pub fn expenses_total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Check the record's field constraints
    ///
    /// # Errors
    ///
    /// Returns one `field: message` line per violated constraint, sorted by
    /// field path.
    pub fn check(&self) -> Result<(), Vec<String>> {
        self.validate().map_err(|errors| violation_messages(&errors))
    }
}

fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().trim().to_string())
}
