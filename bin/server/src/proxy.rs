//! Upstream API proxy.
//!
//! Forwards `/api/*` traffic to the inventory API, attaching the bearer token
//! from the session cookie. Response bodies pass through untouched; the
//! dashboard never interprets them, and authorization of the proxied call is
//! entirely the upstream's concern.

use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use oraimo_admin_session_guard::SESSION_COOKIE;
use std::sync::Arc;

use crate::auth::AppState;
use crate::error::ProxyError;

/// Largest request body the proxy will buffer for forwarding.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Forwards one request to the upstream API and relays the response.
pub async fn forward(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
) -> Result<Response, ProxyError> {
    let method = request.method().clone();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_string(), |pq| pq.as_str().to_string());
    let url = format!(
        "{}{path_and_query}",
        state.config.upstream.base_url.trim_end_matches('/')
    );

    let content_type = request.headers().get(CONTENT_TYPE).cloned();
    let body = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::BodyRead {
            reason: e.to_string(),
        })?;

    let mut upstream = state.http.request(method, &url);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        upstream = upstream.bearer_auth(cookie.value());
    }
    if let Some(content_type) = content_type {
        upstream = upstream.header(CONTENT_TYPE, content_type);
    }
    if !body.is_empty() {
        upstream = upstream.body(body);
    }

    let upstream_response = upstream.send().await.map_err(|e| {
        if e.is_timeout() {
            ProxyError::UpstreamTimeout
        } else {
            ProxyError::UpstreamUnreachable {
                reason: e.to_string(),
            }
        }
    })?;

    let status = upstream_response.status();
    let content_type = upstream_response.headers().get(CONTENT_TYPE).cloned();
    let body = upstream_response
        .bytes()
        .await
        .map_err(|e| ProxyError::UpstreamUnreachable {
            reason: e.to_string(),
        })?;

    tracing::debug!(%status, %url, "proxied upstream response");

    let mut response = (status, body).into_response();
    if let Some(content_type) = content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ServerConfig, SessionConfig, UpstreamConfig};
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::{Router, routing::any};
    use tower::ServiceExt;

    fn test_state(base_url: &str) -> Arc<AppState> {
        Arc::new(AppState::new(
            reqwest::Client::new(),
            ServerConfig {
                listen_addr: "127.0.0.1:0".to_string(),
                site_root: "dist".to_string(),
                upstream: UpstreamConfig {
                    base_url: base_url.to_string(),
                    timeout_seconds: 1,
                },
                session: SessionConfig::default(),
            },
        ))
    }

    #[tokio::test]
    async fn unreachable_upstream_maps_to_bad_gateway() {
        // RFC 2606 reserved TLD: resolution fails without touching the network.
        let app = Router::new()
            .route("/api/{*path}", any(forward))
            .with_state(test_state("http://upstream.invalid"));

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/v1/products")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
