//! OpenRouteService directions client
//!
//! Requests a driving route between two points from the
//! [OpenRouteService](https://openrouteservice.org) GeoJSON directions
//! endpoint. The provider speaks longitude-first GeoJSON; this module is the
//! only place that order is handled, and everything it returns is
//! latitude-first.

use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoPoint, RouteResult};
use reqwest::{Client, header};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::OpenRouteServiceConfig;
use crate::error::{DirectionsError, has_error, provider_message};

/// Fallback text when an error payload carries no message
const DEFAULT_ERROR_MESSAGE: &str = "Routing API error";

/// Trait for driving directions clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Compute a driving route from `from` to `to`
    async fn directions(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
    ) -> Result<RouteResult, DirectionsError>;
}

/// OpenRouteService-based directions client
#[derive(Debug)]
pub struct OpenRouteServiceClient {
    client: Client,
    config: OpenRouteServiceConfig,
}

/// Request body of the directions endpoint
#[derive(Debug, Serialize)]
struct DirectionsRequest {
    coordinates: [[f64; 2]; 2],
    radiuses: [u32; 2],
}

impl OpenRouteServiceClient {
    /// Create a new OpenRouteService client
    ///
    /// A missing API key is not an error here; it is reported by each call.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OpenRouteServiceConfig) -> Result<Self, DirectionsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DirectionsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn map_transport_error(&self, e: &reqwest::Error) -> DirectionsError {
        if e.is_timeout() {
            DirectionsError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            DirectionsError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl DirectionsClient for OpenRouteServiceClient {
    #[instrument(skip(self), fields(profile = %self.config.profile))]
    async fn directions(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
    ) -> Result<RouteResult, DirectionsError> {
        let api_key = match &self.config.api_key {
            Some(key) if self.config.has_api_key() => key,
            _ => return Err(DirectionsError::MissingApiKey),
        };

        let body = DirectionsRequest {
            coordinates: [from.to_lng_lat(), to.to_lng_lat()],
            radiuses: [self.config.snap_radius_m, self.config.snap_radius_m],
        };

        debug!(%from, %to, "Requesting driving route");

        let response = self
            .client
            .post(self.config.directions_url())
            .header(header::AUTHORIZATION, api_key.expose_secret())
            .header(header::ACCEPT, "application/geo+json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&e))?;
        let payload: Value =
            serde_json::from_str(&text).map_err(|e| DirectionsError::ParseError(e.to_string()))?;

        if status.is_client_error() || status.is_server_error() || has_error(&payload) {
            let message =
                provider_message(&payload).unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
            warn!(status = status.as_u16(), %message, "Routing service returned an error");
            return Err(DirectionsError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let feature = payload
            .get("features")
            .and_then(|f| f.get(0))
            .filter(|f| f.is_object())
            .ok_or(DirectionsError::RouteNotFound)?;

        let route = route_from_feature(feature);
        debug!(
            distance_km = route.distance_km,
            duration_min = route.duration_min,
            points = route.geometry.len(),
            "Route computed"
        );
        Ok(route)
    }
}

/// Convert the first GeoJSON feature into a route
///
/// Missing summary figures count as zero. Coordinate entries with fewer
/// than two numeric components are skipped.
fn route_from_feature(feature: &Value) -> RouteResult {
    let summary = feature.pointer("/properties/summary");
    let figure = |name: &str| {
        summary
            .and_then(|s| s.get(name))
            .and_then(Value::as_f64)
            .unwrap_or_default()
    };

    let geometry = feature
        .pointer("/geometry/coordinates")
        .and_then(Value::as_array)
        .map(|coords| coords.iter().filter_map(point_from_position).collect())
        .unwrap_or_default();

    RouteResult::from_provider_summary(figure("distance"), figure("duration"), geometry)
}

/// Flip a GeoJSON `[lng, lat, ...]` position into a latitude-first point
fn point_from_position(position: &Value) -> Option<GeoPoint> {
    let position = position.as_array()?;
    let lng = position.first()?.as_f64()?;
    let lat = position.get(1)?.as_f64()?;
    GeoPoint::from_lng_lat(lng, lat).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_axis_order() {
        let point = point_from_position(&json!([16.9, 52.4])).unwrap();
        assert_eq!(point.lat(), 52.4);
        assert_eq!(point.lng(), 16.9);
    }

    #[test]
    fn test_elevation_component_is_ignored() {
        let point = point_from_position(&json!([16.9, 52.4, 71.0])).unwrap();
        assert_eq!(point.lat(), 52.4);
    }

    #[test]
    fn test_short_positions_are_skipped() {
        assert!(point_from_position(&json!([16.9])).is_none());
        assert!(point_from_position(&json!("16.9,52.4")).is_none());
        assert!(point_from_position(&json!([null, 52.4])).is_none());
    }

    #[test]
    fn test_feature_conversion() {
        let feature = json!({
            "properties": {"summary": {"distance": 12_345.678, "duration": 1_000.0}},
            "geometry": {"coordinates": [[16.9, 52.4], [17.0], [17.1, 52.5]]}
        });
        let route = route_from_feature(&feature);
        assert_eq!(route.distance_m, 12_345.68);
        assert_eq!(route.distance_km, 12.35);
        assert_eq!(route.duration_min, 16.7);
        assert_eq!(route.geometry.len(), 2);
        assert_eq!(route.geometry[1].lng(), 17.1);
    }

    #[test]
    fn test_feature_without_summary_or_geometry() {
        let route = route_from_feature(&json!({}));
        assert_eq!(route.distance_km, 0.0);
        assert_eq!(route.duration_min, 0.0);
        assert!(route.geometry.is_empty());
    }

    #[test]
    fn test_request_body_is_longitude_first() {
        let from = GeoPoint::new(52.4, 16.9).unwrap();
        let to = GeoPoint::new(52.5, 17.1).unwrap();
        let body = DirectionsRequest {
            coordinates: [from.to_lng_lat(), to.to_lng_lat()],
            radiuses: [350, 350],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"coordinates": [[16.9, 52.4], [17.1, 52.5]], "radiuses": [350, 350]})
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_io() {
        let client =
            OpenRouteServiceClient::new(&OpenRouteServiceConfig::for_testing("http://127.0.0.1:9", None))
                .unwrap();
        let point = GeoPoint::new(52.4, 16.9).unwrap();
        let err = client.directions(&point, &point).await.unwrap_err();
        assert!(matches!(err, DirectionsError::MissingApiKey));
    }
}
