//! Address search port
//!
//! Resolves free-form address text to candidate positions. Adapters in the
//! infrastructure layer implement this port on top of a geocoding provider.

use async_trait::async_trait;
use domain::GeocodeCandidate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for address search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Look up candidates for a non-empty, trimmed query
    ///
    /// Candidates are returned in provider relevance order. Rows the provider
    /// returned with missing fields are kept with degraded values.
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeCandidate>, ApplicationError>;
}
