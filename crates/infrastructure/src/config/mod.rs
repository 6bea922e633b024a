//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `security`: API keys
//!
//! Provider settings (`geocoding`, `routing`) reuse the client configs from
//! `integration_routing`.

mod security;
mod server;

use integration_routing::{NominatimConfig, OpenRouteServiceConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use security::{ApiKeyEntry, SecurityConfig};
pub use server::ServerConfig;

/// Prefix of environment variable overrides, e.g. `TRIPCOST_SERVER__PORT`
pub const ENV_PREFIX: &str = "TRIPCOST";

/// Conventional variable holding the OpenRouteService key
///
/// Used only when no key is configured through the file or a
/// `TRIPCOST_ROUTING__API_KEY` override.
pub const ROUTING_API_KEY_VAR: &str = "OPENROUTESERVICE_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Address search provider
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// Driving directions provider
    #[serde(default)]
    pub routing: OpenRouteServiceConfig,

    /// Security configuration
    #[serde(default)]
    pub security: SecurityConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from environment and an optional file
    ///
    /// `path` is passed to `config::File::with_name`, so the extension may
    /// be omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        // The conventional variable has the lowest precedence
        if let Some(key) = std::env::var(ROUTING_API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
        {
            debug!("Using {ROUTING_API_KEY_VAR} as routing key fallback");
            builder = builder.set_default("routing.api_key", key)?;
        }

        let config = builder
            // Load from file if exists
            .add_source(config::File::with_name(path).required(false))
            // Override with environment variables (e.g., TRIPCOST_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.geocoding.validate()?;
        self.routing.validate()?;
        self.security.validate()
    }
}
