//! Geocoding adapter - Implements GeocodingPort using integration_routing

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::{DomainError, GeocodeCandidate};
use integration_routing::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
use tracing::{debug, instrument};

/// Provider tag used in client-facing error messages
pub const GEOCODING_PROVIDER: &str = "Nominatim";

/// Adapter for address search via Nominatim
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"dyn GeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create an adapter around an existing client
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    /// Create an adapter backed by a Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config).map_err(map_geocoding_error)?;
        Ok(Self::new(Arc::new(client)))
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeCandidate>, ApplicationError> {
        let candidates = self
            .client
            .search(query)
            .await
            .map_err(map_geocoding_error)?;
        debug!(count = candidates.len(), "Geocoding adapter returned candidates");
        Ok(candidates)
    }
}

/// Translate a provider client error into the application taxonomy
pub(crate) fn map_geocoding_error(error: GeocodingError) -> ApplicationError {
    match error {
        GeocodingError::EmptyQuery => DomainError::EmptyQuery.into(),
        GeocodingError::Provider { message, .. } => {
            ApplicationError::upstream_application(GEOCODING_PROVIDER, message)
        },
        transport @ (GeocodingError::ConnectionFailed(_)
        | GeocodingError::Timeout { .. }
        | GeocodingError::ParseError(_)) => {
            ApplicationError::upstream_transport(GEOCODING_PROVIDER, transport.to_string())
        },
    }
}
