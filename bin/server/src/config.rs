//! Centralized server configuration.
//!
//! Strongly-typed configuration for the dashboard server, loaded via the
//! `config` crate from environment variables (`__` separates nesting, so
//! `UPSTREAM__BASE_URL` sets `upstream.base_url`).

use serde::Deserialize;

/// Server configuration composed from section configs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the dashboard listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory holding the built dashboard bundle served as static assets.
    #[serde(default = "default_site_root")]
    pub site_root: String,

    /// Upstream inventory API configuration.
    pub upstream: UpstreamConfig,

    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Upstream inventory API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the inventory API, e.g. `https://api.oraimo.internal`.
    pub base_url: String,

    /// Request timeout for proxied and login calls, in seconds.
    #[serde(default = "default_upstream_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Whether to set the Secure flag on the session cookie (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP
    /// development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,

    /// Cookie Max-Age fallback, in minutes, used when a login token carries
    /// no `exp` claim of its own.
    #[serde(default = "default_session_duration_minutes")]
    pub duration_minutes: i64,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_site_root() -> String {
    "dist".to_string()
}

fn default_upstream_timeout_seconds() -> u64 {
    30
}

fn default_secure_cookies() -> bool {
    true
}

fn default_session_duration_minutes() -> i64 {
    720
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure_cookies: default_secure_cookies(),
            duration_minutes: default_session_duration_minutes(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
