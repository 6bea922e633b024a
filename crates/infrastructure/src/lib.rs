//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer on top of the
//! provider clients, and owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{ApiKeyEntry, AppConfig, SecurityConfig, ServerConfig};
pub use telemetry::{DEFAULT_LOG_FILTER, LogFormat, TelemetryError, init_logging};
