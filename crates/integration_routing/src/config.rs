//! Provider client configuration

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Configuration for the Nominatim address search service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Identifying `User-Agent`; Nominatim's usage policy requires one
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of candidates per query
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    "TripCostPlanner/1.0 (tripcost)".to_string()
}

const fn default_result_limit() -> u8 {
    5
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            user_agent: default_user_agent(),
            result_limit: default_result_limit(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration pointing at a local mock server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("geocoding.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("geocoding.timeout_secs must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("geocoding.user_agent must not be empty".to_string());
        }
        if !(1..=50).contains(&self.result_limit) {
            return Err("geocoding.result_limit must be between 1 and 50".to_string());
        }
        Ok(())
    }
}

/// Configuration for the OpenRouteService directions API
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenRouteServiceConfig {
    /// Base URL for the OpenRouteService API
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,

    /// Routing profile, e.g. `driving-car`
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Request timeout in seconds
    #[serde(default = "default_routing_timeout_secs")]
    pub timeout_secs: u64,

    /// Search radius in metres for snapping each point onto the road network
    #[serde(default = "default_snap_radius_m")]
    pub snap_radius_m: u32,

    /// API key (sensitive); routing is unavailable without it
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for OpenRouteServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteServiceConfig")
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .field("timeout_secs", &self.timeout_secs)
            .field("snap_radius_m", &self.snap_radius_m)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .finish()
    }
}

fn default_routing_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_profile() -> String {
    "driving-car".to_string()
}

const fn default_routing_timeout_secs() -> u64 {
    10
}

const fn default_snap_radius_m() -> u32 {
    350
}

impl Default for OpenRouteServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            profile: default_profile(),
            timeout_secs: default_routing_timeout_secs(),
            snap_radius_m: default_snap_radius_m(),
            api_key: None,
        }
    }
}

impl OpenRouteServiceConfig {
    /// Create a configuration pointing at a local mock server
    #[must_use]
    pub fn for_testing(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            api_key: api_key.map(|k| SecretString::from(k.to_owned())),
            ..Default::default()
        }
    }

    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        use secrecy::ExposeSecret;
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Full URL of the GeoJSON directions endpoint
    #[must_use]
    pub fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}/geojson",
            self.base_url.trim_end_matches('/'),
            self.profile
        )
    }

    /// Validate the configuration
    ///
    /// A missing API key is not a configuration error here; it is reported
    /// per call so the rest of the service can run without routing.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("routing.base_url must not be empty".to_string());
        }
        if self.profile.trim().is_empty() {
            return Err("routing.profile must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("routing.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
