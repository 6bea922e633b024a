//! Geographic point value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A geographic point in latitude-first order
///
/// This is the canonical order for everything inside the application and
/// for display. Routing providers speak GeoJSON, which is longitude-first;
/// use [`GeoPoint::to_lng_lat`] and [`GeoPoint::from_lng_lat`] at that
/// boundary and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    lat: f64,
    /// Longitude in degrees
    lng: f64,
}

impl GeoPoint {
    /// Create a new point, rejecting non-finite components
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if either component is NaN
    /// or infinite.
    pub fn new(lat: f64, lng: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() {
            return Err(DomainError::invalid_coordinates(format!(
                "latitude must be a finite number, got {lat}"
            )));
        }
        if !lng.is_finite() {
            return Err(DomainError::invalid_coordinates(format!(
                "longitude must be a finite number, got {lng}"
            )));
        }
        Ok(Self { lat, lng })
    }

    /// Build a point from optional components as received from a client
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if a component is missing
    /// or not finite.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Result<Self, DomainError> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Self::new(lat, lng),
            _ => Err(DomainError::invalid_coordinates(
                "both lat and lng are required",
            )),
        }
    }

    /// Build a point from a GeoJSON `[lng, lat]` position
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if a component is not finite.
    pub fn from_lng_lat(lng: f64, lat: f64) -> Result<Self, DomainError> {
        Self::new(lat, lng)
    }

    /// Latitude in degrees
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }

    /// GeoJSON position, longitude first
    #[must_use]
    pub const fn to_lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_finite_point() {
        let p = GeoPoint::new(52.4, 16.9).unwrap();
        assert_eq!(p.lat(), 52.4);
        assert_eq!(p.lng(), 16.9);
    }

    #[test]
    fn rejects_nan_and_infinity() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
        assert!(GeoPoint::new(f64::NEG_INFINITY, f64::NAN).is_err());
    }

    #[test]
    fn from_parts_requires_both_components() {
        assert!(GeoPoint::from_parts(Some(1.0), None).is_err());
        assert!(GeoPoint::from_parts(None, Some(1.0)).is_err());
        assert!(GeoPoint::from_parts(Some(1.0), Some(2.0)).is_ok());
    }

    #[test]
    fn lng_lat_order_is_flipped_at_the_boundary() {
        let p = GeoPoint::from_lng_lat(16.9, 52.4).unwrap();
        assert_eq!(p.lat(), 52.4);
        assert_eq!(p.lng(), 16.9);
        assert_eq!(p.to_lng_lat(), [16.9, 52.4]);
    }

    #[test]
    fn display_is_latitude_first() {
        let p = GeoPoint::new(52.4, 16.9).unwrap();
        assert_eq!(p.to_string(), "52.400000, 16.900000");
    }

    #[test]
    fn serializes_as_lat_lng_object() {
        let p = GeoPoint::new(52.4, 16.9).unwrap();
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json, serde_json::json!({"lat": 52.4, "lng": 16.9}));
    }
}
