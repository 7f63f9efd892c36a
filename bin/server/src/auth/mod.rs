//! Authentication for the oraimo admin dashboard server.
//!
//! This module provides:
//! - Request-time session gating (middleware applied ahead of every route)
//! - Login/logout endpoints that issue and clear the session cookie
//!
//! # Trust Model
//!
//! The dashboard holds no identity of its own. The upstream inventory API
//! issues the bearer token at login; this server carries it in the
//! `oraimo_token` cookie and derives gating decisions from its decoded
//! claims without verifying the signature. Gating here is navigation UX:
//! the upstream API authorizes every data request against the same token
//! on its own.

pub mod middleware;
pub mod routes;

pub use middleware::session_guard;
pub use routes::{login, logout};

use crate::config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// HTTP client for upstream API calls.
    pub http: reqwest::Client,
    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(http: reqwest::Client, config: ServerConfig) -> Self {
        Self { http, config }
    }
}
