//! HTTP middleware components
//!
//! Authentication, request correlation and body extraction.

pub mod auth;
pub mod request_id;
pub mod validation;

pub use auth::{ApiKeyAuth, ApiKeyAuthLayer, ApiKeyStore};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer, RequestIdService};
pub use validation::{ApiJson, ValidatedJson};
