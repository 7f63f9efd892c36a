//! Login and logout endpoints.
//!
//! Login proxies the submitted credentials to the upstream inventory API and,
//! when the returned token decodes to an unexpired admin session, sets the
//! `oraimo_token` cookie. The guard never sets this cookie itself; issuing
//! and clearing it happens only here and on the expired-token path of the
//! request guard.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use oraimo_admin_session_guard::{LOGIN_PATH, Role, SESSION_COOKIE, decode_claims};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Duration as TimeDuration;

use super::AppState;
use crate::error::LoginError;

/// Upstream endpoint that exchanges credentials for a bearer token.
const UPSTREAM_LOGIN_PATH: &str = "/api/v1/auth/login";

/// Credentials submitted by the login form.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned to the dashboard after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Canonical role extracted from the issued token.
    pub role: String,
}

/// Token envelope returned by the upstream login endpoint.
#[derive(Debug, Deserialize)]
struct UpstreamLoginResponse {
    token: String,
}

/// Exchanges credentials for a session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(credentials): Json<LoginRequest>,
) -> Result<impl IntoResponse, LoginError> {
    let url = format!(
        "{}{UPSTREAM_LOGIN_PATH}",
        state.config.upstream.base_url.trim_end_matches('/')
    );

    let response = state
        .http
        .post(&url)
        .json(&credentials)
        .send()
        .await
        .map_err(|e| LoginError::UpstreamUnreachable {
            reason: e.to_string(),
        })?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(LoginError::InvalidCredentials);
    }
    if !status.is_success() {
        return Err(LoginError::UpstreamStatus {
            status: status.as_u16(),
        });
    }

    let body: UpstreamLoginResponse =
        response
            .json()
            .await
            .map_err(|e| LoginError::UpstreamUnreachable {
                reason: e.to_string(),
            })?;

    let claims = decode_claims(&body.token).ok_or(LoginError::MalformedToken)?;
    if claims.is_expired() {
        return Err(LoginError::ExpiredToken);
    }

    let Some(role) = Role::from_claims(&claims) else {
        return Err(LoginError::AccessDenied { role: None });
    };
    if !role.is_admin() {
        return Err(LoginError::AccessDenied {
            role: Some(role.to_string()),
        });
    }

    // Max-Age follows the token's own lifetime; tokens without an exp claim
    // fall back to the configured duration.
    let max_age = match claims.exp {
        Some(exp) => TimeDuration::seconds((exp - Utc::now().timestamp()).max(0)),
        None => TimeDuration::minutes(state.config.session.duration_minutes),
    };

    // Not HttpOnly: the client-side guard re-reads this cookie on every
    // navigation.
    let cookie = Cookie::build((SESSION_COOKIE, body.token))
        .path("/")
        .secure(state.config.session.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(max_age);

    tracing::info!(role = %role, "administrator logged in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            role: role.to_string(),
        }),
    ))
}

/// Clears the session cookie and returns to the login page.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let removal = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    (jar.add(removal), Redirect::to(LOGIN_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::{Router, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn logout_clears_cookie_and_redirects_to_login() {
        let app = Router::new().route("/auth/logout", get(logout));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/auth/logout")
                    .header(header::COOKIE, format!("{SESSION_COOKIE}=whatever"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .expect("location header"),
            "/login"
        );

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("removal cookie")
            .to_str()
            .expect("utf-8 cookie");
        assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}=")));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn logout_without_cookie_still_redirects() {
        let app = Router::new().route("/auth/logout", get(logout));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/auth/logout")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}
