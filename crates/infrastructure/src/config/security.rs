//! Security configuration: API keys.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// An API key with the caller identity it authenticates
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiKeyEntry {
    /// The bearer token (sensitive)
    #[serde(skip_serializing)]
    pub key: SecretString,

    /// Caller ID recorded for requests made with this key
    pub caller_id: String,
}

impl std::fmt::Debug for ApiKeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyEntry")
            .field("key", &"[REDACTED]")
            .field("caller_id", &self.caller_id)
            .finish()
    }
}

impl ApiKeyEntry {
    /// Create a new entry
    #[must_use]
    pub fn new(key: &str, caller_id: &str) -> Self {
        Self {
            key: SecretString::from(key.to_owned()),
            caller_id: caller_id.to_string(),
        }
    }
}

/// Security configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// API keys accepted as `Authorization: Bearer <key>`
    ///
    /// With no keys configured authentication is disabled.
    ///
    /// Example in config.toml:
    /// ```toml
    /// [[security.api_keys]]
    /// key = "change-me"
    /// caller_id = "planner-web"
    /// ```
    #[serde(default)]
    pub api_keys: Vec<ApiKeyEntry>,
}

impl SecurityConfig {
    /// Check if the configuration has any API keys configured
    #[must_use]
    pub fn has_api_keys(&self) -> bool {
        !self.api_keys.is_empty()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a key or caller ID is blank.
    pub fn validate(&self) -> Result<(), String> {
        for (index, entry) in self.api_keys.iter().enumerate() {
            if entry.key.expose_secret().trim().is_empty() {
                return Err(format!("security.api_keys[{index}].key must not be empty"));
            }
            if entry.caller_id.trim().is_empty() {
                return Err(format!(
                    "security.api_keys[{index}].caller_id must not be empty"
                ));
            }
        }
        Ok(())
    }
}
