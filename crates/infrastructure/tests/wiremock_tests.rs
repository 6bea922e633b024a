//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - Geocoding adapter against a mocked Nominatim
//! - Routing adapter against a mocked OpenRouteService
//! - Error taxonomy at the port boundary

use application::{ApplicationError, ErrorKind, GeocodingPort, RoutingPort};
use domain::GeoPoint;
use integration_routing::{NominatimConfig, OpenRouteServiceConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use infrastructure::{GeocodingAdapter, ROUTE_NOT_FOUND_HINT, RoutingAdapter};

fn krakow() -> GeoPoint {
    GeoPoint::new(50.0614, 19.9366).unwrap()
}

fn gdansk() -> GeoPoint {
    GeoPoint::new(54.352, 18.6466).unwrap()
}

// ============================================================================
// Geocoding Adapter Tests
// ============================================================================

mod geocoding_adapter_tests {
    use super::*;

    fn adapter_for(server: &MockServer) -> GeocodingAdapter {
        GeocodingAdapter::from_config(&NominatimConfig::for_testing(&server.uri())).unwrap()
    }

    #[tokio::test]
    async fn returns_candidates_in_provider_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"display_name": "Kraków, Polska", "lat": "50.0614", "lon": "19.9366"},
                {"display_name": "Kraków, Wisconsin", "lat": "44.59", "lon": "-87.92"}
            ])))
            .mount(&server)
            .await;

        let candidates = adapter_for(&server).geocode("Kraków").await.unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].display_name, "Kraków, Polska");
        assert_eq!(candidates[1].lng, Some(-87.92));
    }

    #[tokio::test]
    async fn unreachable_provider_is_upstream_transport() {
        // Nothing listens on the discard port
        let adapter =
            GeocodingAdapter::from_config(&NominatimConfig::for_testing("http://127.0.0.1:9"))
                .unwrap();

        let err = adapter.geocode("Kraków").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamTransport);
        assert!(err.to_string().starts_with("Nominatim: "));
    }

    #[tokio::test]
    async fn provider_error_is_upstream_application() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "Access blocked"}
            })))
            .mount(&server)
            .await;

        let err = adapter_for(&server).geocode("Kraków").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamApplication);
        assert_eq!(err.to_string(), "Nominatim: Access blocked");
    }
}

// ============================================================================
// Routing Adapter Tests
// ============================================================================

mod routing_adapter_tests {
    use super::*;

    fn adapter_for(server: &MockServer, key: Option<&str>) -> RoutingAdapter {
        RoutingAdapter::from_config(&OpenRouteServiceConfig::for_testing(&server.uri(), key))
            .unwrap()
    }

    #[tokio::test]
    async fn returns_latitude_first_geometry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/directions/driving-car/geojson"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "features": [{
                    "properties": {"summary": {"distance": 540_000.0, "duration": 19_800.0}},
                    "geometry": {"coordinates": [[19.9366, 50.0614], [18.6466, 54.352]]}
                }]
            })))
            .mount(&server)
            .await;

        let route = adapter_for(&server, Some("key"))
            .route(&krakow(), &gdansk())
            .await
            .unwrap();

        assert_eq!(route.distance_km, 540.0);
        assert_eq!(route.duration_min, 330.0);
        assert_eq!(route.geometry[0], krakow());
        assert_eq!(route.geometry[1], gdansk());
    }

    #[tokio::test]
    async fn missing_key_is_configuration_error_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = adapter_for(&server, None)
            .route(&krakow(), &gdansk())
            .await
            .unwrap_err();

        assert!(err.is_configuration());
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[tokio::test]
    async fn empty_feature_collection_is_route_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/directions/driving-car/geojson"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .mount(&server)
            .await;

        let err = adapter_for(&server, Some("key"))
            .route(&krakow(), &gdansk())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RouteNotFound);
        assert_eq!(err.to_string(), ROUTE_NOT_FOUND_HINT);
    }

    #[tokio::test]
    async fn provider_rejection_keeps_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/directions/driving-car/geojson"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "Authorization field missing"
            })))
            .mount(&server)
            .await;

        let err = adapter_for(&server, Some("bad"))
            .route(&krakow(), &gdansk())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamApplication);
        assert_eq!(err.to_string(), "ORS: Authorization field missing");
    }

    #[tokio::test]
    async fn garbage_body_is_upstream_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/directions/driving-car/geojson"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = adapter_for(&server, Some("key"))
            .route(&krakow(), &gdansk())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamTransport);
        assert!(err.to_string().starts_with("ORS: "));
    }
}
