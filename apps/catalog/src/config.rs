//! Configuration management for the catalog service.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Binaries call `dotenvy::dotenv()` first so a local `.env` file applies.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Catalog data configuration
    pub catalog: CatalogConfig,
    /// Tracker client configuration (used by the demo client)
    pub tracker: TrackerConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Catalog data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Start with the sample items and books
    pub seed_data: bool,
}

/// Tracker client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of a running catalog server
    pub base_url: String,
    /// How long an operation waits for its completion, in milliseconds
    pub response_timeout_ms: u64,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: var_or("HOST", "0.0.0.0"),
                port: parsed_or("PORT", 5000),
                log_level: var_or("RUST_LOG", "info"),
                shutdown_timeout: parsed_or("SHUTDOWN_TIMEOUT", 30),
            },
            catalog: CatalogConfig {
                seed_data: parsed_or("CATALOG_SEED_DATA", true),
            },
            tracker: TrackerConfig {
                base_url: var_or("CATALOG_URL", "http://localhost:5000"),
                response_timeout_ms: parsed_or("TRACKER_RESPONSE_TIMEOUT_MS", 10_000),
            },
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind the listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Graceful shutdown timeout.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

impl TrackerConfig {
    /// Base of the REST API, e.g. `http://localhost:5000/api`.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }

    /// Response timeout as a duration.
    #[must_use]
    pub const fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}
