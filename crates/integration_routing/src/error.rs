//! Provider error types

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during address search
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// The query was blank after trimming
    #[error("Empty query")]
    EmptyQuery,

    /// Connection to the geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Geocoding request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The response body was not the expected JSON
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// The service answered but reported a failure
    #[error("Geocoding API error ({status}): {message}")]
    Provider {
        /// HTTP status of the response
        status: u16,
        /// Message reported by the service
        message: String,
    },
}

impl GeocodingError {
    /// Returns true if the service could not be reached or understood
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::ParseError(_)
        )
    }
}

/// Errors that can occur while requesting a driving route
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// No API key is configured
    #[error("OPENROUTESERVICE_API_KEY not configured")]
    MissingApiKey,

    /// Connection to the routing service failed
    #[error("Routing connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Routing request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The response body was not the expected JSON
    #[error("Routing parse error: {0}")]
    ParseError(String),

    /// The service answered but reported a failure
    #[error("Routing API error ({status}): {message}")]
    Provider {
        /// HTTP status of the response
        status: u16,
        /// Message reported by the service
        message: String,
    },

    /// The service found no route between the points
    #[error("No route found between the given points")]
    RouteNotFound,
}

impl DirectionsError {
    /// Returns true if the service could not be reached or understood
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::ParseError(_)
        )
    }
}

/// Pull a human-readable message out of a provider error payload
///
/// Looks at `error.message`, then `message`, then a plain string `error`.
pub(crate) fn provider_message(payload: &Value) -> Option<String> {
    payload
        .pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| payload.get("message").and_then(Value::as_str))
        .or_else(|| payload.get("error").and_then(Value::as_str))
        .map(ToString::to_string)
}

/// Whether a payload carries an embedded error object or string
pub(crate) fn has_error(payload: &Value) -> bool {
    payload
        .get("error")
        .is_some_and(|e| e.is_object() || e.is_string())
}
