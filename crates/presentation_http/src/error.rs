//! API error handling
//!
//! Every failure is answered with `{ok: false, error, code}`. Validation
//! failures may add an `errors` list; route failures echo the submitted
//! points as `debug: {from, to}` so callers can see what was sent upstream.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Echo of the points a route request was made with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDebug {
    pub from: Value,
    pub to: Value,
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad or missing input
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Server-side setting missing, e.g. the routing key
    #[error("{0}")]
    Configuration(String),

    /// A provider failed; `message` already carries the provider tag
    #[error("{message}")]
    Upstream {
        code: &'static str,
        message: String,
        debug: Option<RouteDebug>,
    },

    #[error("{message}")]
    RouteNotFound {
        message: String,
        debug: Option<RouteDebug>,
    },
}

impl ApiError {
    /// Validation failure with a single message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Attach the submitted route points to upstream and not-found errors
    #[must_use]
    pub fn with_route_debug(self, route_debug: RouteDebug) -> Self {
        match self {
            Self::Upstream { code, message, .. } => Self::Upstream {
                code,
                message,
                debug: Some(route_debug),
            },
            Self::RouteNotFound { message, .. } => Self::RouteNotFound {
                message,
                debug: Some(route_debug),
            },
            other => other,
        }
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Unauthorized(_) => "unauthorized",
            Self::Configuration(_) => "configuration_error",
            Self::Upstream { code, .. } => code,
            Self::RouteNotFound { .. } => "route_not_found",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub ok: bool,
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Individual constraint violations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Submitted route points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<RouteDebug>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();
        let error = self.to_string();

        let (errors, debug) = match self {
            Self::Validation { errors, .. } => (errors, None),
            Self::Upstream { debug, .. } | Self::RouteNotFound { debug, .. } => (Vec::new(), debug),
            Self::Unauthorized(_) | Self::Configuration(_) => (Vec::new(), None),
        };

        let body = ErrorResponse {
            ok: false,
            error,
            code,
            errors,
            debug,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::validation(e.to_string()),
            ApplicationError::Configuration(msg) => Self::Configuration(msg),
            ApplicationError::UpstreamTransport { .. } => Self::Upstream {
                code: "upstream_transport_error",
                message: err.to_string(),
                debug: None,
            },
            ApplicationError::UpstreamApplication { .. } => Self::Upstream {
                code: "upstream_provider_error",
                message: err.to_string(),
                debug: None,
            },
            ApplicationError::RouteNotFound { hint } => Self::RouteNotFound {
                message: hint,
                debug: None,
            },
        }
    }
}
