//! Session evaluation from the raw cookie value.
//!
//! Both evaluation contexts (the request-time guard and the client guard)
//! derive the session state fresh from the current cookie value at every
//! decision point. Nothing here is cached across a token refresh or clear.

use chrono::{DateTime, Utc};

use crate::role::Role;
use crate::token::decode_claims;

/// Name of the cookie carrying the raw bearer token.
pub const SESSION_COOKIE: &str = "oraimo_token";

/// Outcome of evaluating the session cookie at a decision point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No cookie, or a token that could not be decoded.
    Anonymous,
    /// Token decoded but its expiry is in the past. Callers must clear the
    /// cookie so later requests skip the decode for a token already known dead.
    Expired,
    /// Token decoded and unexpired. The role is absent when the token carries
    /// no recognized role claim, which is distinct from being unauthenticated.
    Authenticated { role: Option<Role> },
}

impl SessionState {
    /// Evaluates a raw cookie value into a session state at the given instant.
    #[must_use]
    pub fn evaluate(cookie_value: Option<&str>, now: DateTime<Utc>) -> Self {
        let Some(token) = cookie_value else {
            return Self::Anonymous;
        };
        let Some(claims) = decode_claims(token) else {
            tracing::debug!("session cookie present but undecodable");
            return Self::Anonymous;
        };
        if claims.is_expired_at(now) {
            tracing::debug!("session token expired");
            return Self::Expired;
        }
        Self::Authenticated {
            role: Role::from_claims(&claims),
        }
    }

    /// Evaluates a raw cookie value at the current wall-clock time.
    #[must_use]
    pub fn evaluate_now(cookie_value: Option<&str>) -> Self {
        Self::evaluate(cookie_value, Utc::now())
    }

    /// Returns true for a decoded, unexpired token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns true for an authenticated session holding the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Authenticated { role: Some(role) } if role.is_admin())
    }

    /// Returns the session role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        match self {
            Self::Authenticated { role } => role.as_ref(),
            _ => None,
        }
    }
}
