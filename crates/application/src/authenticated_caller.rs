//! Proof that a request passed the authentication check
//!
//! An [`AuthenticatedCaller`] is created by the HTTP authentication layer
//! once a request's credentials have been verified, and handed to every
//! service operation that requires an authenticated caller. Services never
//! look at credentials themselves.
//!
//! # Examples
//!
//! ```
//! use application::AuthenticatedCaller;
//!
//! let caller = AuthenticatedCaller::new("planner-web");
//! assert_eq!(caller.caller_id(), "planner-web");
//! assert!(!caller.request_id().is_nil());
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifier used when authentication is disabled
pub const ANONYMOUS_CALLER_ID: &str = "anonymous";

/// An authenticated caller plus per-request metadata
///
/// - `caller_id`: who is calling, as configured next to their API key
/// - `request_id`: a unique identifier for tracing/logging
/// - `timestamp`: when the request was received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCaller {
    caller_id: String,
    request_id: Uuid,
    timestamp: DateTime<Utc>,
}

impl AuthenticatedCaller {
    /// Create a caller with a fresh request ID
    #[must_use]
    pub fn new(caller_id: impl Into<String>) -> Self {
        Self::with_request_id(caller_id, Uuid::new_v4())
    }

    /// Create a caller with a specific request ID
    ///
    /// Useful when the request ID is provided by an upstream proxy and
    /// needs to be correlated in logs.
    #[must_use]
    pub fn with_request_id(caller_id: impl Into<String>, request_id: Uuid) -> Self {
        Self {
            caller_id: caller_id.into(),
            request_id,
            timestamp: Utc::now(),
        }
    }

    /// The caller used when no API keys are configured
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(ANONYMOUS_CALLER_ID)
    }

    #[must_use]
    pub fn caller_id(&self) -> &str {
        &self.caller_id
    }

    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether this caller was admitted without credentials
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.caller_id == ANONYMOUS_CALLER_ID
    }
}
