//! Trip cost engine
//!
//! A pure function from [`TripParameters`] to [`CostResult`]. It is the only
//! implementation of the cost formula: the HTTP service, the CLI and any
//! browser build link this crate instead of re-deriving the arithmetic.
//!
//! Rounding happens once per output field, on the unrounded intermediate
//! values. `total_cost` is therefore not necessarily the sum of the rounded
//! breakdown fields; the difference is bounded by the rounding error of the
//! four extra-cost terms (at most 0.02).

use serde::{Deserialize, Serialize};

use crate::rounding::round_half_up;
use crate::value_objects::TripParameters;

/// Decimal places of every monetary and volume figure
const MONEY_PLACES: u32 = 2;

/// Per-category split of the total cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub fuel: f64,
    pub route: f64,
    pub lodging: f64,
    pub food: f64,
    pub other: f64,
}

/// Derived cost figures of a trip
///
/// Always recomputed from the parameters; never the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResult {
    /// Fuel volume needed for the distance
    pub liters: f64,
    /// Fuel volume times fuel price
    pub fuel_cost: f64,
    /// Route, lodging, food and other costs
    pub extras_cost: f64,
    /// Fuel plus extras
    pub total_cost: f64,
    /// Total divided by the number of travelers
    pub cost_per_person: f64,
    /// Per-category figures, each rounded independently
    pub breakdown: CostBreakdown,
}

/// Compute the cost figures of a trip
///
/// # Examples
///
/// ```
/// use domain::{TripParameters, calculate};
///
/// let params = TripParameters::new(100.0, 6.0, 7.0)
///     .with_people_count(2)
///     .with_route_cost(10.0)
///     .with_lodging_cost(50.0)
///     .with_food_cost(20.0);
///
/// let result = calculate(&params);
/// assert_eq!(result.liters, 7.0);
/// assert_eq!(result.fuel_cost, 42.0);
/// assert_eq!(result.extras_cost, 80.0);
/// assert_eq!(result.total_cost, 122.0);
/// assert_eq!(result.cost_per_person, 61.0);
/// ```
#[must_use]
pub fn calculate(params: &TripParameters) -> CostResult {
    let liters = (params.distance_km() / 100.0) * params.fuel_consumption_per_100();
    let fuel_cost = liters * params.fuel_price();

    let extras_cost =
        params.route_cost() + params.lodging_cost() + params.food_cost() + params.other_cost();
    let total_cost = fuel_cost + extras_cost;
    let cost_per_person = total_cost / f64::from(params.people_count().max(1));

    CostResult {
        liters: round(liters),
        fuel_cost: round(fuel_cost),
        extras_cost: round(extras_cost),
        total_cost: round(total_cost),
        cost_per_person: round(cost_per_person),
        breakdown: CostBreakdown {
            fuel: round(fuel_cost),
            route: round(params.route_cost()),
            lodging: round(params.lodging_cost()),
            food: round(params.food_cost()),
            other: round(params.other_cost()),
        },
    }
}

fn round(value: f64) -> f64 {
    round_half_up(value, MONEY_PLACES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_trip() -> TripParameters {
        TripParameters::new(100.0, 6.0, 7.0)
            .with_people_count(2)
            .with_route_cost(10.0)
            .with_lodging_cost(50.0)
            .with_food_cost(20.0)
            .with_other_cost(0.0)
    }

    #[test]
    fn reference_trip_figures() {
        let r = calculate(&reference_trip());
        assert_eq!(r.liters, 7.0);
        assert_eq!(r.fuel_cost, 42.0);
        assert_eq!(r.extras_cost, 80.0);
        assert_eq!(r.total_cost, 122.0);
        assert_eq!(r.cost_per_person, 61.0);
        assert_eq!(
            r.breakdown,
            CostBreakdown {
                fuel: 42.0,
                route: 10.0,
                lodging: 50.0,
                food: 20.0,
                other: 0.0,
            }
        );
    }

    #[test]
    fn empty_trip_is_all_zero() {
        let r = calculate(&TripParameters::default());
        assert_eq!(r.liters, 0.0);
        assert_eq!(r.fuel_cost, 0.0);
        assert_eq!(r.extras_cost, 0.0);
        assert_eq!(r.total_cost, 0.0);
        assert_eq!(r.cost_per_person, 0.0);
        assert_eq!(r.breakdown.fuel, 0.0);
    }

    #[test]
    fn zero_people_divides_like_one() {
        let zero = TripParameters::new(250.0, 6.49, 6.2).with_people_count(0);
        let one = TripParameters::new(250.0, 6.49, 6.2).with_people_count(1);
        assert_eq!(calculate(&zero), calculate(&one));
    }

    #[test]
    fn figures_are_rounded_to_cents() {
        let params = TripParameters::new(123.0, 6.79, 5.9).with_people_count(3);
        let r = calculate(&params);
        // 123 / 100 * 5.9 = 7.257 l, * 6.79 = 49.27503
        assert_eq!(r.liters, 7.26);
        assert_eq!(r.fuel_cost, 49.28);
        assert_eq!(r.cost_per_person, 16.43);
    }

    #[test]
    fn total_is_rounded_from_unrounded_terms() {
        let params = TripParameters::default()
            .with_route_cost(0.004)
            .with_lodging_cost(0.004)
            .with_food_cost(0.004);
        let r = calculate(&params);
        let sum_of_parts = r.breakdown.fuel
            + r.breakdown.route
            + r.breakdown.lodging
            + r.breakdown.food
            + r.breakdown.other;
        assert_eq!(sum_of_parts, 0.0);
        assert_eq!(r.total_cost, 0.01);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(calculate(&reference_trip())).unwrap();
        assert_eq!(json["costPerPerson"], 61.0);
        assert_eq!(json["extrasCost"], 80.0);
        assert_eq!(json["breakdown"]["lodging"], 50.0);
    }

    #[test]
    fn calculation_is_repeatable() {
        let params = reference_trip();
        assert_eq!(calculate(&params), calculate(&params));
    }
}
