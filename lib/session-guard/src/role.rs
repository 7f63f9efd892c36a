//! Role extraction and normalization.
//!
//! Upstream tokens carry their role under one of three claim shapes depending
//! on which issuer minted them. Extraction walks a fixed precedence list and
//! normalizes the result so the rest of the guard compares a single canonical
//! string.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::token::TokenClaims;

/// Canonical role string derived from token claims.
///
/// Roles are uppercased and a single leading `ROLE_` prefix is stripped, so
/// `role_admin`, `ROLE_ADMIN`, and `ADMIN` all compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Normalizes a raw claim value into a canonical role.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        let canonical = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        Self(canonical.to_string())
    }

    /// Extracts the role from decoded claims.
    ///
    /// Precedence is fixed: the `role` claim wins, then the first entry of
    /// `authorities`, then the first entry of `roles`. Empty lists do not
    /// match. Returns `None` when no claim matches; an authenticated session
    /// may legitimately carry no role.
    #[must_use]
    pub fn from_claims(claims: &TokenClaims) -> Option<Self> {
        let raw = claims
            .role
            .as_deref()
            .or_else(|| {
                claims
                    .authorities
                    .as_ref()
                    .and_then(|a| a.first())
                    .map(String::as_str)
            })
            .or_else(|| {
                claims
                    .roles
                    .as_ref()
                    .and_then(|r| r.first())
                    .map(String::as_str)
            })?;
        Some(Self::normalize(raw))
    }

    /// Returns the canonical role string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this role grants admin access to the dashboard.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.0 == "ADMIN"
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
