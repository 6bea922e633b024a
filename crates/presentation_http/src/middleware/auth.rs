//! API key authentication middleware
//!
//! Validates Bearer tokens in the Authorization header against the configured
//! API keys. Keys are compared in constant time and every entry is checked,
//! so the response time does not reveal which key almost matched.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    response::{IntoResponse, Response},
};
use infrastructure::ApiKeyEntry;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{Span, debug};

use crate::error::ApiError;
use crate::middleware::RequestId;

/// Paths served without a key
const PUBLIC_PATHS: &[&str] = &["/health"];

#[derive(Clone)]
struct StoredKey {
    key: SecretString,
    caller_id: String,
}

/// Configured API keys and the callers they identify
#[derive(Clone, Default)]
pub struct ApiKeyStore {
    entries: Vec<StoredKey>,
}

impl std::fmt::Debug for ApiKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyStore")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl ApiKeyStore {
    /// Build a store from configured entries; entries with a blank key are skipped
    #[must_use]
    pub fn from_entries(entries: &[ApiKeyEntry]) -> Self {
        let entries = entries
            .iter()
            .filter(|entry| !entry.key.expose_secret().trim().is_empty())
            .map(|entry| StoredKey {
                key: entry.key.clone(),
                caller_id: entry.caller_id.clone(),
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the caller id of the entry matching `api_key`
    #[must_use]
    pub fn verify(&self, api_key: &str) -> Option<String> {
        let presented = api_key.as_bytes();
        let mut matched = None;
        for entry in &self.entries {
            let equal: bool = entry.key.expose_secret().as_bytes().ct_eq(presented).into();
            if equal && matched.is_none() {
                matched = Some(entry.caller_id.clone());
            }
        }
        matched
    }
}

/// Layer that applies API key authentication
#[derive(Clone, Debug)]
pub struct ApiKeyAuthLayer {
    api_key_store: Arc<ApiKeyStore>,
}

impl ApiKeyAuthLayer {
    /// Require one of the given keys on every non-public path
    ///
    /// With no usable keys every request runs as the anonymous caller.
    #[must_use]
    pub fn from_api_keys(entries: &[ApiKeyEntry]) -> Self {
        Self {
            api_key_store: Arc::new(ApiKeyStore::from_entries(entries)),
        }
    }
}

impl<S> Layer<S> for ApiKeyAuthLayer {
    type Service = ApiKeyAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyAuth {
            inner,
            api_key_store: Arc::clone(&self.api_key_store),
        }
    }
}

/// Middleware service for API key authentication
#[derive(Clone, Debug)]
pub struct ApiKeyAuth<S> {
    inner: S,
    api_key_store: Arc<ApiKeyStore>,
}

impl<S> Service<Request> for ApiKeyAuth<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let api_key_store = Arc::clone(&self.api_key_store);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let path = req.uri().path();
            if PUBLIC_PATHS.iter().any(|p| path.starts_with(p)) {
                return inner.call(req).await;
            }

            if api_key_store.is_empty() {
                inject_caller(&mut req, None);
                return inner.call(req).await;
            }

            let auth_header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok());

            match auth_header.map(|h| h.strip_prefix("Bearer ")) {
                Some(Some(token)) => {
                    if let Some(caller_id) = api_key_store.verify(token.trim()) {
                        debug!(caller = %caller_id, "API key accepted");
                        inject_caller(&mut req, Some(&caller_id));
                        return inner.call(req).await;
                    }
                    Ok(unauthorized_response("Invalid API key"))
                },
                Some(None) => Ok(unauthorized_response(
                    "Invalid authorization format, expected Bearer token",
                )),
                None => Ok(unauthorized_response("Missing Authorization header")),
            }
        })
    }
}

/// Insert the [`application::AuthenticatedCaller`] handlers extract
///
/// Reuses the request id assigned by `RequestIdLayer` when present and
/// records the caller on the request span.
fn inject_caller(req: &mut Request, caller_id: Option<&str>) {
    let caller = req
        .extensions()
        .get::<RequestId>()
        .copied()
        .unwrap_or_else(RequestId::generate)
        .caller(caller_id);

    Span::current().record("caller", caller.caller_id());
    req.extensions_mut().insert(caller);
}

fn unauthorized_response(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
