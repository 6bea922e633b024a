//! Nominatim geocoding client
//!
//! Resolves free-form address text to candidate positions using the
//! [Nominatim](https://nominatim.openstreetmap.org) search API
//! (OpenStreetMap). One upstream request per call; no caching and no
//! retries.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeocodeCandidate;
use reqwest::{Client, header};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::NominatimConfig;
use crate::error::{GeocodingError, has_error, provider_message};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Look up candidate positions for an address, in relevance order
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, GeocodingError>;
}

/// Nominatim-based geocoding client
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodingError::EmptyQuery);
        }

        let params = [
            ("format", "jsonv2".to_string()),
            ("limit", self.config.result_limit.to_string()),
            ("q", query.to_string()),
        ];

        debug!(%query, "Searching address");

        let response = self
            .client
            .get(self.search_url())
            .header(header::ACCEPT, "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GeocodingError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                GeocodingError::ConnectionFailed(e.to_string())
            }
        })?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        if !status.is_success() {
            let message = provider_message(&payload).unwrap_or_else(|| format!("HTTP {status}"));
            warn!(status = status.as_u16(), %message, "Geocoding service returned an error");
            return Err(GeocodingError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        if has_error(&payload) {
            let message =
                provider_message(&payload).unwrap_or_else(|| "Geocoding API error".to_string());
            warn!(%message, "Geocoding service embedded an error in a success response");
            return Err(GeocodingError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let Value::Array(rows) = payload else {
            return Err(GeocodingError::ParseError(
                "expected a JSON array of results".to_string(),
            ));
        };

        let candidates: Vec<GeocodeCandidate> = rows.iter().map(candidate_from_row).collect();
        debug!(count = candidates.len(), "Address search completed");
        Ok(candidates)
    }
}

/// Map one result row, degrading missing or malformed fields
fn candidate_from_row(row: &Value) -> GeocodeCandidate {
    GeocodeCandidate {
        display_name: row
            .get("display_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        lat: row.get("lat").and_then(coordinate),
        lng: row.get("lon").and_then(coordinate),
    }
}

/// Nominatim sends coordinates as strings; accept numbers as well
fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
