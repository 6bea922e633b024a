//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use application::{ApplicationError, GeocodingPort, RoutePlanningService, RoutingPort};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use domain::{GeoPoint, GeocodeCandidate, RouteResult};
use infrastructure::{ApiKeyEntry, AppConfig};
use presentation_http::{routes::create_router, state::AppState};
use serde_json::{Value, json};

type GeocodeFn = fn(&str) -> Result<Vec<GeocodeCandidate>, ApplicationError>;
type RouteFn = fn(&GeoPoint, &GeoPoint) -> Result<RouteResult, ApplicationError>;

/// Mock geocoding provider that counts its calls
struct MockGeocoding {
    respond: GeocodeFn,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl GeocodingPort for MockGeocoding {
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeCandidate>, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(query)
    }
}

/// Mock routing provider that counts its calls
struct MockRouting {
    respond: RouteFn,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl RoutingPort for MockRouting {
    async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<RouteResult, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(from, to)
    }
}

fn poznan(query: &str) -> Result<Vec<GeocodeCandidate>, ApplicationError> {
    Ok(vec![GeocodeCandidate::new(
        format!("{query}, Wielkopolska, Polska"),
        52.4064,
        16.9252,
    )])
}

fn straight_route(from: &GeoPoint, to: &GeoPoint) -> Result<RouteResult, ApplicationError> {
    Ok(RouteResult::from_provider_summary(
        303_512.4,
        11_220.0,
        vec![*from, *to],
    ))
}

struct Harness {
    server: TestServer,
    geocode_calls: Arc<AtomicUsize>,
    route_calls: Arc<AtomicUsize>,
}

fn harness_with(config: AppConfig, geocode: GeocodeFn, route: RouteFn) -> Harness {
    let geocode_calls = Arc::new(AtomicUsize::new(0));
    let route_calls = Arc::new(AtomicUsize::new(0));

    let service = RoutePlanningService::new(
        Arc::new(MockGeocoding {
            respond: geocode,
            calls: Arc::clone(&geocode_calls),
        }),
        Arc::new(MockRouting {
            respond: route,
            calls: Arc::clone(&route_calls),
        }),
    );
    let state = AppState {
        route_planning: Arc::new(service),
        config: Arc::new(config),
    };
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");

    Harness {
        server,
        geocode_calls,
        route_calls,
    }
}

fn harness(geocode: GeocodeFn, route: RouteFn) -> Harness {
    harness_with(AppConfig::default(), geocode, route)
}

fn default_harness() -> Harness {
    harness(poznan, straight_route)
}

fn keyed_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.security.api_keys = vec![ApiKeyEntry::new("sk-test", "web-ui")];
    config
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let h = default_harness();

    let response = h.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn health_needs_no_key() {
    let h = harness_with(keyed_config(), poznan, straight_route);

    h.server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn responses_carry_request_id() {
    let h = default_harness();

    let response = h.server.get("/health").await;

    let request_id = response.header("x-request-id");
    assert!(!request_id.is_empty());
}

// ============================================================================
// Geocode
// ============================================================================

#[tokio::test]
async fn geocode_returns_candidates() {
    let h = default_harness();

    let response = h
        .server
        .get("/v1/geocode")
        .add_query_param("q", "Poznań")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["items"][0]["display_name"], "Poznań, Wielkopolska, Polska");
    assert_eq!(body["items"][0]["lat"], 52.4064);
    assert_eq!(body["items"][0]["lng"], 16.9252);
}

#[tokio::test]
async fn blank_geocode_query_is_rejected_locally() {
    let h = default_harness();

    let response = h.server.get("/v1/geocode").add_query_param("q", "   ").await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Empty query");
    assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_geocode_query_is_rejected() {
    let h = default_harness();

    let response = h.server.get("/v1/geocode").await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn geocode_provider_failure_is_bad_gateway() {
    let h = harness(
        |_| Err(ApplicationError::upstream_transport("Nominatim", "connection refused")),
        straight_route,
    );

    let response = h.server.get("/v1/geocode").add_query_param("q", "Kraków").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"], "Nominatim: connection refused");
    assert_eq!(body["code"], "upstream_transport_error");
}

// ============================================================================
// Route
// ============================================================================

#[tokio::test]
async fn route_returns_summary_and_geometry() {
    let h = default_harness();

    let response = h
        .server
        .post("/v1/route")
        .json(&json!({
            "from": {"lat": 52.4064, "lng": 16.9252},
            "to": {"lat": "54.3520", "lng": "18.6466"}
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["distance_m"], 303_512.4);
    assert_eq!(body["distance_km"], 303.51);
    assert_eq!(body["duration_min"], 187.0);
    assert_eq!(body["geometry"][0], json!({"lat": 52.4064, "lng": 16.9252}));
    assert_eq!(body["geometry"][1], json!({"lat": 54.352, "lng": 18.6466}));
}

#[tokio::test]
async fn route_with_bad_coordinates_is_rejected_locally() {
    let h = default_harness();

    let response = h
        .server
        .post("/v1/route")
        .json(&json!({"from": {"lat": "north", "lng": 16.9}, "to": {"lat": 54.3, "lng": 18.6}}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid coordinates");
    assert_eq!(h.route_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn route_with_missing_point_is_rejected() {
    let h = default_harness();

    let response = h
        .server
        .post("/v1/route")
        .json(&json!({"from": {"lat": 52.4, "lng": 16.9}}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn route_not_found_echoes_points() {
    let h = harness(poznan, |_, _| {
        Err(ApplicationError::RouteNotFound {
            hint: "Route not found. Try addresses in a city center or click directly on roads."
                .to_string(),
        })
    });
    let from = json!({"lat": 52.4, "lng": 16.9});
    let to = json!({"lat": 0.0, "lng": -30.0});

    let response = h
        .server
        .post("/v1/route")
        .json(&json!({"from": from, "to": to}))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert_eq!(body["code"], "route_not_found");
    assert!(body["error"].as_str().unwrap().starts_with("Route not found."));
    assert_eq!(body["debug"]["from"], from);
    assert_eq!(body["debug"]["to"], to);
}

#[tokio::test]
async fn missing_routing_key_is_internal_error() {
    let h = harness(poznan, |_, _| {
        Err(ApplicationError::Configuration(
            "OPENROUTESERVICE_API_KEY not configured".to_string(),
        ))
    });

    let response = h
        .server
        .post("/v1/route")
        .json(&json!({"from": {"lat": 52.4, "lng": 16.9}, "to": {"lat": 54.3, "lng": 18.6}}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "OPENROUTESERVICE_API_KEY not configured");
}

#[tokio::test]
async fn routing_provider_error_is_bad_gateway_with_debug() {
    let h = harness(poznan, |_, _| {
        Err(ApplicationError::upstream_application("ORS", "Quota exceeded"))
    });

    let response = h
        .server
        .post("/v1/route")
        .json(&json!({"from": {"lat": 52.4, "lng": 16.9}, "to": {"lat": 54.3, "lng": 18.6}}))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"], "ORS: Quota exceeded");
    assert_eq!(body["code"], "upstream_provider_error");
    assert_eq!(body["debug"]["from"]["lat"], 52.4);
}

// ============================================================================
// Cost calculation
// ============================================================================

#[tokio::test]
async fn calculate_trip_attaches_cost_figures() {
    let h = default_harness();

    let response = h
        .server
        .post("/v1/trips/calculate")
        .json(&json!({
            "title": "  Poznań weekend ",
            "distance_km": 100,
            "fuel_price": 6,
            "fuel_consumption_per_100": 7,
            "people_count": 2,
            "route_cost": 10,
            "lodging_cost": 50,
            "food_cost": 20,
            "expenses": [{"category": "parking", "amount": 12.5}]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    let item = &body["item"];
    assert_eq!(item["title"], "Poznań weekend");
    assert_eq!(item["distance_km"], 100.0);
    assert_eq!(item["calc"]["totalCost"], 122.0);
    assert_eq!(item["calc"]["costPerPerson"], 61.0);
    assert_eq!(item["calc"]["breakdown"]["fuel"], 42.0);
    assert_eq!(item["expenses_total"], 12.5);
}

#[tokio::test]
async fn invalid_trip_lists_violations() {
    let h = default_harness();

    let response = h
        .server
        .post("/v1/trips/calculate")
        .json(&json!({"title": "   ", "distance_km": 10}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        body["errors"],
        json!(["title: must be between 1 and 255 characters"])
    );
}

#[tokio::test]
async fn calculate_parameters_clamps_inputs() {
    let h = default_harness();

    let response = h
        .server
        .post("/v1/calculate")
        .json(&json!({
            "distance_km": 250,
            "fuel_price": 6.5,
            "fuel_consumption_per_100": 6.2,
            "people_count": 0,
            "food_cost": -40
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    // 250 / 100 * 6.2 = 15.5 l, * 6.5 = 100.75
    assert_eq!(body["liters"], 15.5);
    assert_eq!(body["fuelCost"], 100.75);
    assert_eq!(body["extrasCost"], 0.0);
    assert_eq!(body["costPerPerson"], 100.75);
}

#[tokio::test]
async fn malformed_json_is_unprocessable() {
    let h = default_harness();

    let response = h
        .server
        .post("/v1/calculate")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn configured_keys_are_required() {
    let h = harness_with(keyed_config(), poznan, straight_route);

    let response = h.server.get("/v1/geocode").add_query_param("q", "Gdańsk").await;

    response.assert_status_unauthorized();
    assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wrong_key_is_rejected() {
    let h = harness_with(keyed_config(), poznan, straight_route);

    let response = h
        .server
        .post("/v1/calculate")
        .authorization_bearer("sk-nope")
        .json(&json!({}))
        .await;

    response.assert_status_unauthorized();
    let body: Value = response.json();
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn valid_key_is_accepted() {
    let h = harness_with(keyed_config(), poznan, straight_route);

    let response = h
        .server
        .get("/v1/geocode")
        .add_query_param("q", "Gdańsk")
        .authorization_bearer("sk-test")
        .await;

    response.assert_status_ok();
    assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 1);
}
