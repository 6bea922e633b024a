//! Driving route port

use async_trait::async_trait;
use domain::{GeoPoint, RouteResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for driving distance, duration and geometry between two points
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Compute a driving route
    ///
    /// Fails with `ApplicationError::Configuration` before any network
    /// call when the provider credential is missing, and with
    /// `ApplicationError::RouteNotFound` when the provider has no route.
    async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<RouteResult, ApplicationError>;
}
