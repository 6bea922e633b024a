//! Geocoding candidate value object

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// One address match returned by a geocoding provider
///
/// Candidates keep the provider's relevance order. A row the provider
/// returned without a usable name or position is kept with an empty name
/// or missing coordinates rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    /// Human-readable address
    pub display_name: String,
    /// Latitude, if the provider supplied a parsable one
    pub lat: Option<f64>,
    /// Longitude, if the provider supplied a parsable one
    pub lng: Option<f64>,
}

impl GeocodeCandidate {
    /// Create a fully populated candidate
    #[must_use]
    pub fn new(display_name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            display_name: display_name.into(),
            lat: Some(lat),
            lng: Some(lng),
        }
    }

    /// The candidate's position, if both coordinates are present and finite
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.lat, self.lng).ok()
    }
}
