//! Bearer token decoding and expiry.
//!
//! Session tokens are three-segment signed envelopes (`header.payload.signature`).
//! Only the payload is ever inspected here, and the signature is never
//! verified: the token is opaque bearer material and real authorization
//! happens upstream on every API call. The decoded claims gate navigation
//! flow only.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Claims carried in the payload segment of a session token.
///
/// Only the claims relevant to route gating are modeled; any other payload
/// fields are ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Canonical role claim. Wins over the list-shaped claims when present.
    pub role: Option<String>,
    /// Authority list; the first entry is used when `role` is absent.
    pub authorities: Option<Vec<String>>,
    /// Legacy role list; the first entry is used when the other claims are absent.
    pub roles: Option<Vec<String>>,
    /// Expiry as Unix seconds. A token without `exp` never expires.
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Returns true if the `exp` claim is strictly in the past at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            Some(exp) => now.timestamp_millis() > exp * 1000,
            None => false,
        }
    }

    /// Returns true if the `exp` claim is strictly in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Decodes the payload segment of a token without verifying its signature.
///
/// Returns `None` for anything that is not a well-formed three-segment token
/// whose payload is base64url-encoded JSON. Malformed input is indistinguishable
/// from no token at the call sites, so decoding never surfaces an error.
#[must_use]
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    // Tokens minted by some issuers pad the payload segment; strip it so the
    // no-pad alphabet accepts both forms.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}
