//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Coarse classification of an [`ApplicationError`]
///
/// Presentation layers map these to their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing local input, including missing configuration
    Validation,
    /// A provider could not be reached or its answer could not be read
    UpstreamTransport,
    /// A provider was reached but reported a failure
    UpstreamApplication,
    /// A provider answered successfully with no route
    RouteNotFound,
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level validation error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A required setting, such as a provider credential, is missing
    #[error("{0}")]
    Configuration(String),

    /// A provider could not be reached, timed out, or sent an unreadable body
    #[error("{provider}: {message}")]
    UpstreamTransport {
        /// Provider tag, e.g. `Nominatim` or `ORS`
        provider: String,
        /// Low-level error text
        message: String,
    },

    /// A provider was reached but reported an error
    #[error("{provider}: {message}")]
    UpstreamApplication {
        /// Provider tag, e.g. `Nominatim` or `ORS`
        provider: String,
        /// The provider's own error message
        message: String,
    },

    /// The provider found no route between the points
    #[error("{hint}")]
    RouteNotFound {
        /// Advice to show the user
        hint: String,
    },
}

impl ApplicationError {
    /// Build a transport error tagged with a provider name
    pub fn upstream_transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamTransport {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Build an application error tagged with a provider name
    pub fn upstream_application(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamApplication {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::Configuration(_) => ErrorKind::Validation,
            Self::UpstreamTransport { .. } => ErrorKind::UpstreamTransport,
            Self::UpstreamApplication { .. } => ErrorKind::UpstreamApplication,
            Self::RouteNotFound { .. } => ErrorKind::RouteNotFound,
        }
    }

    /// Whether this validation failure is caused by missing configuration
    /// rather than by the caller's input
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
