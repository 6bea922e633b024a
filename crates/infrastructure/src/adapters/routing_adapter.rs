//! Routing adapter - Implements RoutingPort using integration_routing

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::{GeoPoint, RouteResult};
use integration_routing::{
    DirectionsClient, DirectionsError, OpenRouteServiceClient, OpenRouteServiceConfig,
};
use tracing::{debug, instrument};

/// Provider tag used in client-facing error messages
pub const ROUTING_PROVIDER: &str = "ORS";

/// Hint shown when the provider finds no drivable connection
pub const ROUTE_NOT_FOUND_HINT: &str =
    "Route not found. Try addresses in a city center or click directly on roads.";

/// Adapter for driving routes via OpenRouteService
pub struct RoutingAdapter {
    client: Arc<dyn DirectionsClient>,
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("client", &"dyn DirectionsClient")
            .finish()
    }
}

impl RoutingAdapter {
    /// Create an adapter around an existing client
    pub fn new(client: Arc<dyn DirectionsClient>) -> Self {
        Self { client }
    }

    /// Create an adapter backed by an OpenRouteService client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &OpenRouteServiceConfig) -> Result<Self, ApplicationError> {
        let client = OpenRouteServiceClient::new(config).map_err(map_directions_error)?;
        Ok(Self::new(Arc::new(client)))
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self))]
    async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<RouteResult, ApplicationError> {
        let route = self
            .client
            .directions(from, to)
            .await
            .map_err(map_directions_error)?;
        debug!(distance_km = route.distance_km, "Routing adapter returned route");
        Ok(route)
    }
}

/// Translate a provider client error into the application taxonomy
pub(crate) fn map_directions_error(error: DirectionsError) -> ApplicationError {
    match error {
        DirectionsError::MissingApiKey => ApplicationError::Configuration(error.to_string()),
        DirectionsError::Provider { message, .. } => {
            ApplicationError::upstream_application(ROUTING_PROVIDER, message)
        },
        DirectionsError::RouteNotFound => ApplicationError::RouteNotFound {
            hint: ROUTE_NOT_FOUND_HINT.to_string(),
        },
        transport @ (DirectionsError::ConnectionFailed(_)
        | DirectionsError::Timeout { .. }
        | DirectionsError::ParseError(_)) => {
            ApplicationError::upstream_transport(ROUTING_PROVIDER, transport.to_string())
        },
    }
}

#[cfg(test)]
mod tests {
    use application::ErrorKind;

    use super::*;

    #[test]
    fn test_missing_key_is_configuration() {
        let mapped = map_directions_error(DirectionsError::MissingApiKey);
        assert!(mapped.is_configuration());
        assert_eq!(mapped.kind(), ErrorKind::Validation);
        assert_eq!(mapped.to_string(), "OPENROUTESERVICE_API_KEY not configured");
    }

    #[test]
    fn test_provider_message_is_tagged() {
        let mapped = map_directions_error(DirectionsError::Provider {
            status: 404,
            message: "Could not find routable point".to_string(),
        });
        assert_eq!(mapped.kind(), ErrorKind::UpstreamApplication);
        assert_eq!(mapped.to_string(), "ORS: Could not find routable point");
    }

    #[test]
    fn test_route_not_found_carries_hint() {
        let mapped = map_directions_error(DirectionsError::RouteNotFound);
        assert_eq!(mapped.kind(), ErrorKind::RouteNotFound);
        assert_eq!(mapped.to_string(), ROUTE_NOT_FOUND_HINT);
    }

    #[test]
    fn test_timeout_is_transport() {
        let mapped = map_directions_error(DirectionsError::Timeout { timeout_secs: 10 });
        assert_eq!(mapped.kind(), ErrorKind::UpstreamTransport);
        assert!(mapped.to_string().contains("timed out after 10 seconds"));
    }
}
