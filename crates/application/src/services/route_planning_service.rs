//! Route planning service
//!
//! The entry point for address search and driving routes. Every operation
//! takes an [`AuthenticatedCaller`]; input is validated here so that the
//! ports only ever see a trimmed, non-empty query.

use std::{fmt, sync::Arc};

use domain::{DomainError, GeoPoint, GeocodeCandidate, RouteResult};
use tracing::{info, instrument, warn};

use crate::{
    authenticated_caller::AuthenticatedCaller,
    error::ApplicationError,
    ports::{GeocodingPort, RoutingPort},
};

/// Service for resolving addresses and computing driving routes
pub struct RoutePlanningService {
    geocoding: Arc<dyn GeocodingPort>,
    routing: Arc<dyn RoutingPort>,
}

impl fmt::Debug for RoutePlanningService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePlanningService").finish_non_exhaustive()
    }
}

impl RoutePlanningService {
    /// Create a new route planning service
    pub fn new(geocoding: Arc<dyn GeocodingPort>, routing: Arc<dyn RoutingPort>) -> Self {
        Self { geocoding, routing }
    }

    /// Resolve an address to candidate positions
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyQuery` for a blank query without calling
    /// the provider, or the provider failure otherwise.
    #[instrument(
        skip(self, caller),
        fields(caller = %caller.caller_id(), request_id = %caller.request_id())
    )]
    pub async fn geocode(
        &self,
        caller: &AuthenticatedCaller,
        query: &str,
    ) -> Result<Vec<GeocodeCandidate>, ApplicationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::EmptyQuery.into());
        }

        info!("Resolving address");
        let candidates = self.geocoding.geocode(query).await.inspect_err(|e| {
            warn!(error = %e, "Address search failed");
        })?;
        info!(count = candidates.len(), "Address resolved");
        Ok(candidates)
    }

    /// Compute a driving route between two points
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` for non-finite points
    /// without calling the provider, or the provider failure otherwise.
    #[instrument(
        skip(self, caller),
        fields(caller = %caller.caller_id(), request_id = %caller.request_id())
    )]
    pub async fn route(
        &self,
        caller: &AuthenticatedCaller,
        from: &GeoPoint,
        to: &GeoPoint,
    ) -> Result<RouteResult, ApplicationError> {
        // Points deserialized from the wire bypass `GeoPoint::new`
        let from = GeoPoint::new(from.lat(), from.lng())?;
        let to = GeoPoint::new(to.lat(), to.lng())?;

        info!("Computing route");
        let route = self.routing.route(&from, &to).await.inspect_err(|e| {
            warn!(error = %e, "Route computation failed");
        })?;
        info!(
            distance_km = route.distance_km,
            duration_min = route.duration_min,
            "Route computed"
        );
        Ok(route)
    }
}
