//! Trip cost handlers
//!
//! Both endpoints compute from the submitted record only; nothing is stored.

use axum::Json;
use domain::{CostResult, Trip, TripParameters, calculate};
use serde::Serialize;
use tracing::debug;

use crate::middleware::{ApiJson, ValidatedJson};

/// A trip with its derived figures
#[derive(Debug, Serialize)]
pub struct CalculatedTrip {
    #[serde(flatten)]
    pub trip: Trip,
    pub calc: CostResult,
    pub expenses_total: f64,
}

#[derive(Debug, Serialize)]
pub struct CalculatedTripResponse {
    pub ok: bool,
    pub item: CalculatedTrip,
}

/// Validate a trip record and attach its cost figures
pub async fn calculate_trip(
    ValidatedJson(trip): ValidatedJson<Trip>,
) -> Json<CalculatedTripResponse> {
    let calc = trip.cost();
    let expenses_total = domain::round_half_up(trip.expenses_total(), 2);
    debug!(title = %trip.title, total_cost = calc.total_cost, "Trip calculated");

    Json(CalculatedTripResponse {
        ok: true,
        item: CalculatedTrip {
            trip,
            calc,
            expenses_total,
        },
    })
}

/// Run the cost engine on bare parameters
pub async fn calculate_parameters(ApiJson(params): ApiJson<TripParameters>) -> Json<CostResult> {
    Json(calculate(&params))
}
