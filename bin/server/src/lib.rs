//! oraimo admin dashboard server.
//!
//! Serves the built dashboard bundle, gates navigation on the session cookie
//! ahead of every route, and proxies API traffic to the upstream inventory
//! platform with the bearer token attached.

pub mod auth;
pub mod config;
pub mod error;
pub mod proxy;
