//! Routing provider integration for tripcost
//!
//! Provides address search via [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org)
//! and driving directions via [OpenRouteService](https://openrouteservice.org).
//!
//! # Architecture
//!
//! Each provider sits behind a client trait: [`GeocodingClient`] is
//! implemented by [`NominatimGeocodingClient`], [`DirectionsClient`] by
//! [`OpenRouteServiceClient`]. The clients normalize the providers' response
//! shapes into domain values and report failures as [`GeocodingError`] and
//! [`DirectionsError`], which distinguish transport failures from errors the
//! provider reported itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::GeoPoint;
//! use integration_routing::{DirectionsClient, OpenRouteServiceClient, OpenRouteServiceConfig};
//!
//! let client = OpenRouteServiceClient::new(&OpenRouteServiceConfig::default())?;
//! let route = client.directions(
//!     &GeoPoint::new(52.4064, 16.9252)?, // Poznań
//!     &GeoPoint::new(52.2297, 21.0122)?, // Warszawa
//! ).await?;
//! ```

mod config;
mod directions;
mod error;
mod geocoding;

pub use config::{NominatimConfig, OpenRouteServiceConfig};
pub use directions::{DirectionsClient, OpenRouteServiceClient};
pub use error::{DirectionsError, GeocodingError};
pub use geocoding::{GeocodingClient, NominatimGeocodingClient};
