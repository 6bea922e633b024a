//! Thin client for the tripcost HTTP API

use std::time::Duration;

use domain::{GeoPoint, GeocodeCandidate, RouteResult};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

/// Errors talking to the server
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with its error envelope
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Parse(String),
}

/// API client bound to one server
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    /// Create a client; a blank key is treated as no key
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, CliError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<Value, CliError> {
        let request = self.http.get(self.endpoint_url("/health"));
        send(request).await
    }

    /// `GET /v1/geocode`
    pub async fn geocode(&self, query: &str) -> Result<Vec<GeocodeCandidate>, CliError> {
        let request = self
            .authorized(self.http.get(self.endpoint_url("/v1/geocode")))
            .query(&[("q", query)]);
        let body: Value = send(request).await?;
        let items = body.get("items").cloned().unwrap_or(Value::Null);
        serde_json::from_value(items).map_err(|e| CliError::Parse(e.to_string()))
    }

    /// `POST /v1/route`
    pub async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<RouteResult, CliError> {
        let request = self
            .authorized(self.http.post(self.endpoint_url("/v1/route")))
            .json(&json!({
                "from": {"lat": from.lat(), "lng": from.lng()},
                "to": {"lat": to.lat(), "lng": to.lng()},
            }));
        send(request).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, CliError> {
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    debug!(status = status.as_u16(), bytes = text.len(), "Server responded");

    if !status.is_success() {
        return Err(CliError::Api {
            status: status.as_u16(),
            message: error_message(&text, status),
        });
    }

    serde_json::from_str(&text).map_err(|e| CliError::Parse(e.to_string()))
}

fn error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {status}"))
}
