//! Domain error types for server operations.
//!
//! Each surface (login flow, API proxy) has its own error enum; conversions
//! to HTTP responses keep upstream details out of what the client sees and
//! log the specifics server-side instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Errors from the login flow.
#[derive(Debug)]
pub enum LoginError {
    /// Upstream rejected the credentials.
    InvalidCredentials,
    /// Upstream could not be reached.
    UpstreamUnreachable { reason: String },
    /// Upstream answered with an unexpected status.
    UpstreamStatus { status: u16 },
    /// Upstream issued a token this dashboard cannot decode.
    MalformedToken,
    /// Upstream issued a token that was already expired on arrival.
    ExpiredToken,
    /// The authenticated account does not hold the admin role.
    AccessDenied { role: Option<String> },
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::UpstreamUnreachable { reason } => {
                write!(f, "authentication upstream unreachable: {reason}")
            }
            Self::UpstreamStatus { status } => {
                write!(f, "authentication upstream returned status {status}")
            }
            Self::MalformedToken => write!(f, "upstream issued an undecodable token"),
            Self::ExpiredToken => write!(f, "upstream issued an already-expired token"),
            Self::AccessDenied { role } => match role {
                Some(role) => write!(f, "access denied for role '{role}'"),
                None => write!(f, "access denied for account without a role"),
            },
        }
    }
}

impl std::error::Error for LoginError {}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Self::UpstreamUnreachable { reason } => {
                tracing::error!(error = %reason, "login upstream unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    "Authentication service unavailable",
                )
            }
            Self::UpstreamStatus { status } => {
                tracing::error!(upstream_status = status, "unexpected login upstream status");
                (StatusCode::BAD_GATEWAY, "Authentication failed")
            }
            Self::MalformedToken | Self::ExpiredToken => {
                tracing::error!(error = %self, "login upstream issued an unusable token");
                (StatusCode::BAD_GATEWAY, "Authentication failed")
            }
            Self::AccessDenied { .. } => (
                StatusCode::FORBIDDEN,
                "Access denied - an administrator account is required",
            ),
        };

        (status, message).into_response()
    }
}

/// Errors from the API proxy.
#[derive(Debug)]
pub enum ProxyError {
    /// Upstream could not be reached.
    UpstreamUnreachable { reason: String },
    /// Upstream did not answer within the configured timeout.
    UpstreamTimeout,
    /// The request body could not be buffered for forwarding.
    BodyRead { reason: String },
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpstreamUnreachable { reason } => {
                write!(f, "API upstream unreachable: {reason}")
            }
            Self::UpstreamTimeout => write!(f, "API upstream timed out"),
            Self::BodyRead { reason } => write!(f, "failed to read request body: {reason}"),
        }
    }
}

impl std::error::Error for ProxyError {}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::UpstreamUnreachable { reason } => {
                tracing::error!(error = %reason, "proxy upstream unreachable");
                (StatusCode::BAD_GATEWAY, "Upstream API unavailable")
            }
            Self::UpstreamTimeout => (StatusCode::GATEWAY_TIMEOUT, "Upstream API timed out"),
            Self::BodyRead { reason } => {
                tracing::warn!(error = %reason, "unreadable proxy request body");
                (StatusCode::BAD_REQUEST, "Unreadable request body")
            }
        };

        (status, message).into_response()
    }
}
