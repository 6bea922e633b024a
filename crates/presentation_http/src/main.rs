//! Trip cost planner HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{GeocodingPort, RoutePlanningService, RoutingPort};
use axum::http::{HeaderValue, Method};
use infrastructure::{
    AppConfig, DEFAULT_LOG_FILTER, GeocodingAdapter, LogFormat, RoutingAdapter, init_logging,
};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A broken file must not fall back to defaults: they carry no API keys
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_logging(
        LogFormat::from_name(&config.server.log_format),
        DEFAULT_LOG_FILTER,
    )?;

    info!("Trip cost planner v{} starting", env!("CARGO_PKG_VERSION"));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        geocoding = %config.geocoding.base_url,
        routing = %config.routing.base_url,
        profile = %config.routing.profile,
        "Configuration loaded"
    );
    if !config.routing.has_api_key() {
        warn!("OPENROUTESERVICE_API_KEY not configured; route requests will fail");
    }
    if !config.security.has_api_keys() {
        warn!("No API keys configured; authentication is disabled");
    }

    let geocoding: Arc<dyn GeocodingPort> = Arc::new(
        GeocodingAdapter::from_config(&config.geocoding)
            .map_err(|e| anyhow::anyhow!("Failed to initialize geocoding: {e}"))?,
    );
    let routing: Arc<dyn RoutingPort> = Arc::new(
        RoutingAdapter::from_config(&config.routing)
            .map_err(|e| anyhow::anyhow!("Failed to initialize routing: {e}"))?,
    );

    let config = Arc::new(config);
    let state = AppState {
        route_planning: Arc::new(RoutePlanningService::new(geocoding, routing)),
        config: Arc::clone(&config),
    };

    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };

    // Last added is outermost
    let app = routes::create_router(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    // Draining is done by axum's graceful shutdown
    info!("Waiting up to {:?} for connections to close", timeout);
}
