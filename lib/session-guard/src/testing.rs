//! Token fixtures shared by the crate's tests.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};

/// Builds a three-segment token around the given JSON payload.
pub(crate) fn token_with_payload(payload: &str) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload),
        URL_SAFE_NO_PAD.encode("signature"),
    )
}

/// Token with the given role claim, expiring an hour from now.
pub(crate) fn unexpired_token(role: &str) -> String {
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    token_with_payload(&format!(r#"{{"role":"{role}","exp":{exp}}}"#))
}

/// Admin token whose expiry is an hour in the past.
pub(crate) fn expired_admin_token() -> String {
    let exp = (Utc::now() - Duration::hours(1)).timestamp();
    token_with_payload(&format!(r#"{{"role":"ADMIN","exp":{exp}}}"#))
}
