//! Request body extractors
//!
//! `ApiJson` replaces axum's `Json` so malformed bodies are answered in the
//! API's error envelope. `ValidatedJson` additionally runs the `validator`
//! constraints and lists every violation.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(format!("Invalid JSON: {}", rejection.body_text()))
    }
}

/// JSON body whose rejection is a `422` in the API envelope
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// A JSON extractor that also validates the request body
///
/// # Example
///
/// ```ignore
/// async fn handler(ValidatedJson(trip): ValidatedJson<Trip>) {
///     // trip satisfies its field constraints
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<T>::from_request(req, state).await?;

        value.validate().map_err(|e| ApiError::Validation {
            message: "Validation failed".to_string(),
            errors: domain::violation_messages(&e),
        })?;

        Ok(Self(value))
    }
}
