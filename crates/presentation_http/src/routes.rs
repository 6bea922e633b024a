//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::{
    handlers,
    middleware::{ApiKeyAuthLayer, RequestIdLayer},
    state::AppState,
};

/// Create the main router with all routes
///
/// Request ids are assigned before authentication so the caller context
/// carries them; `/health` bypasses authentication.
pub fn create_router(state: AppState) -> Router {
    let auth_layer = ApiKeyAuthLayer::from_api_keys(&state.config.security.api_keys);
    let body_limit = RequestBodyLimitLayer::new(state.config.server.max_body_size_bytes);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Provider-backed lookups
        .route("/v1/geocode", get(handlers::geocode::geocode))
        .route("/v1/route", post(handlers::route::route))
        // Cost engine
        .route("/v1/trips/calculate", post(handlers::trips::calculate_trip))
        .route("/v1/calculate", post(handlers::trips::calculate_parameters))
        .layer(auth_layer)
        .layer(body_limit)
        .layer(RequestIdLayer::new())
        .with_state(state)
}
