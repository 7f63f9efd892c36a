//! Request-time session gating.
//!
//! Runs ahead of every route, before any page or asset is produced: read the
//! session cookie, evaluate it, and apply the shared routing table. The
//! decision is synchronous with no I/O beyond the one cookie, and a
//! malformed or expired token is a terminal decision for the request, not a
//! retryable condition.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;
use oraimo_admin_session_guard::{
    DASHBOARD_PATH, LOGIN_PATH, RouteDecision, SESSION_COOKIE, SessionState, decide,
};
use time::Duration;

/// Gates a request on the session cookie.
///
/// Passes the request through untouched, or short-circuits with a redirect.
/// When the token is expired the redirect also deletes the cookie, so later
/// requests skip the decode for a token already known dead.
pub async fn session_guard(jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let session = SessionState::evaluate_now(jar.get(SESSION_COOKIE).map(|c| c.value()));

    match decide(path, &session) {
        RouteDecision::Allow => next.run(request).await,
        RouteDecision::RedirectToLogin { clear_cookie } => {
            if clear_cookie {
                tracing::debug!(path, "expired session; clearing cookie");
                let removal = Cookie::build((SESSION_COOKIE, ""))
                    .path("/")
                    .max_age(Duration::ZERO);
                (jar.add(removal), Redirect::to(LOGIN_PATH)).into_response()
            } else {
                Redirect::to(LOGIN_PATH).into_response()
            }
        }
        RouteDecision::RedirectToDashboard => Redirect::to(DASHBOARD_PATH).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode, header};
    use axum::{Router, middleware, routing::get};
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::{Duration as ChronoDuration, Utc};
    use tower::ServiceExt;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode("signature"),
        )
    }

    fn unexpired_token(role: &str) -> String {
        let exp = (Utc::now() + ChronoDuration::hours(1)).timestamp();
        token_with_payload(&format!(r#"{{"role":"{role}","exp":{exp}}}"#))
    }

    fn expired_admin_token() -> String {
        let exp = (Utc::now() - ChronoDuration::hours(1)).timestamp();
        token_with_payload(&format!(r#"{{"role":"ADMIN","exp":{exp}}}"#))
    }

    fn test_app() -> Router {
        Router::new()
            .route("/", get(|| async { "home" }))
            .route("/login", get(|| async { "login" }))
            .route("/forgot-password", get(|| async { "forgot" }))
            .route("/dashboard", get(|| async { "dashboard" }))
            .route("/dashboard/users", get(|| async { "users" }))
            .route("/healthz", get(|| async { "ok" }))
            .layer(middleware::from_fn(session_guard))
    }

    async fn send(app: Router, path: &str, cookie: Option<&str>) -> axum::response::Response {
        let mut request = HttpRequest::builder().uri(path);
        if let Some(token) = cookie {
            request = request.header(header::COOKIE, format!("{SESSION_COOKIE}={token}"));
        }
        app.oneshot(request.body(Body::empty()).expect("request"))
            .await
            .expect("response")
    }

    fn location(response: &axum::response::Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("location header")
            .to_str()
            .expect("utf-8 location")
    }

    #[tokio::test]
    async fn protected_path_without_cookie_redirects_to_login() {
        let response = send(test_app(), "/dashboard/users", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn root_path_without_cookie_redirects_to_login() {
        let response = send(test_app(), "/", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn admin_token_passes_through_protected_path() {
        let token = unexpired_token("ADMIN");
        let response = send(test_app(), "/dashboard/users", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn customer_token_is_redirected_to_login() {
        let token = unexpired_token("CUSTOMER");
        let response = send(test_app(), "/dashboard/users", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        // Only the client guard clears a non-admin cookie; the edge does not.
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn admin_token_on_login_page_redirects_to_dashboard() {
        let token = unexpired_token("ADMIN");
        let response = send(test_app(), "/login", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
    }

    #[tokio::test]
    async fn expired_token_redirects_and_clears_cookie() {
        let token = expired_admin_token();
        let response = send(test_app(), "/dashboard", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");

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
    async fn malformed_token_gates_like_no_token() {
        let response = send(test_app(), "/dashboard", Some("three.part.garbage")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn anonymous_visitor_may_view_auth_pages() {
        let response = send(test_app(), "/login", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = send(test_app(), "/forgot-password", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn public_paths_pass_through_for_everyone() {
        let response = send(test_app(), "/healthz", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let token = unexpired_token("CUSTOMER");
        let response = send(test_app(), "/healthz", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
