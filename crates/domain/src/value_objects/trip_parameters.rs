//! Trip cost inputs
//!
//! Every constructor, builder method and the deserializer sanitize their
//! input: negative or non-finite amounts become `0`, and a headcount below
//! one becomes `1`. The cost engine therefore never sees out-of-range data.
//!
//! # Examples
//!
//! ```
//! use domain::TripParameters;
//!
//! let params = TripParameters::new(100.0, 6.0, 7.0)
//!     .with_people_count(0)
//!     .with_lodging_cost(-20.0);
//!
//! assert_eq!(params.people_count(), 1);
//! assert_eq!(params.lodging_cost(), 0.0);
//! ```

use serde::{Deserialize, Serialize};

/// Numeric inputs of a trip, sanitized on the way in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TripParametersInput")]
pub struct TripParameters {
    distance_km: f64,
    fuel_price: f64,
    fuel_consumption_per_100: f64,
    people_count: u32,
    route_cost: f64,
    lodging_cost: f64,
    food_cost: f64,
    other_cost: f64,
}

impl Default for TripParameters {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl TripParameters {
    /// Create parameters for a trip with one traveler and no extra costs
    #[must_use]
    pub fn new(distance_km: f64, fuel_price: f64, fuel_consumption_per_100: f64) -> Self {
        Self {
            distance_km: non_negative(distance_km),
            fuel_price: non_negative(fuel_price),
            fuel_consumption_per_100: non_negative(fuel_consumption_per_100),
            people_count: 1,
            route_cost: 0.0,
            lodging_cost: 0.0,
            food_cost: 0.0,
            other_cost: 0.0,
        }
    }

    /// Set the number of travelers sharing the cost (coerced to at least 1)
    #[must_use]
    pub fn with_people_count(mut self, people_count: i64) -> Self {
        self.people_count = at_least_one(people_count);
        self
    }

    /// Set the driving distance in kilometres
    #[must_use]
    pub fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = non_negative(distance_km);
        self
    }

    /// Set tolls, vignettes, parking and similar route costs
    #[must_use]
    pub fn with_route_cost(mut self, route_cost: f64) -> Self {
        self.route_cost = non_negative(route_cost);
        self
    }

    /// Set accommodation costs
    #[must_use]
    pub fn with_lodging_cost(mut self, lodging_cost: f64) -> Self {
        self.lodging_cost = non_negative(lodging_cost);
        self
    }

    /// Set food costs
    #[must_use]
    pub fn with_food_cost(mut self, food_cost: f64) -> Self {
        self.food_cost = non_negative(food_cost);
        self
    }

    /// Set any remaining costs
    #[must_use]
    pub fn with_other_cost(mut self, other_cost: f64) -> Self {
        self.other_cost = non_negative(other_cost);
        self
    }

    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    #[must_use]
    pub const fn fuel_price(&self) -> f64 {
        self.fuel_price
    }

    #[must_use]
    pub const fn fuel_consumption_per_100(&self) -> f64 {
        self.fuel_consumption_per_100
    }

    #[must_use]
    pub const fn people_count(&self) -> u32 {
        self.people_count
    }

    #[must_use]
    pub const fn route_cost(&self) -> f64 {
        self.route_cost
    }

    #[must_use]
    pub const fn lodging_cost(&self) -> f64 {
        self.lodging_cost
    }

    #[must_use]
    pub const fn food_cost(&self) -> f64 {
        self.food_cost
    }

    #[must_use]
    pub const fn other_cost(&self) -> f64 {
        self.other_cost
    }
}

/// Clamp an amount to a non-negative finite value
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn at_least_one(count: i64) -> u32 {
    u32::try_from(count.max(1)).unwrap_or(u32::MAX)
}

/// Wire shape of a trip record; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TripParametersInput {
    distance_km: Option<f64>,
    fuel_price: Option<f64>,
    fuel_consumption_per_100: Option<f64>,
    people_count: Option<i64>,
    route_cost: Option<f64>,
    lodging_cost: Option<f64>,
    food_cost: Option<f64>,
    other_cost: Option<f64>,
}

impl From<TripParametersInput> for TripParameters {
    fn from(input: TripParametersInput) -> Self {
        Self::new(
            input.distance_km.unwrap_or_default(),
            input.fuel_price.unwrap_or_default(),
            input.fuel_consumption_per_100.unwrap_or_default(),
        )
        .with_people_count(input.people_count.unwrap_or(1))
        .with_route_cost(input.route_cost.unwrap_or_default())
        .with_lodging_cost(input.lodging_cost.unwrap_or_default())
        .with_food_cost(input.food_cost.unwrap_or_default())
        .with_other_cost(input.other_cost.unwrap_or_default())
    }
}
