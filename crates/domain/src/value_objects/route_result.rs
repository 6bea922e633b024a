//! Driving route value object

use serde::{Deserialize, Serialize};

use super::GeoPoint;
use crate::rounding::round_half_up;

/// Distance, duration and path of a computed driving route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Route length in metres, rounded to 2 decimals
    pub distance_m: f64,
    /// Route length in kilometres, rounded to 2 decimals
    pub distance_km: f64,
    /// Travel time in minutes, rounded to 1 decimal
    pub duration_min: f64,
    /// Path in latitude-first order; empty if the provider sent no geometry
    pub geometry: Vec<GeoPoint>,
}

impl RouteResult {
    /// Build a result from the provider's raw metres and seconds
    #[must_use]
    pub fn from_provider_summary(
        distance_meters: f64,
        duration_seconds: f64,
        geometry: Vec<GeoPoint>,
    ) -> Self {
        Self {
            distance_m: round_half_up(distance_meters, 2),
            distance_km: round_half_up(distance_meters / 1000.0, 2),
            duration_min: round_half_up(duration_seconds / 60.0, 1),
            geometry,
        }
    }
}
