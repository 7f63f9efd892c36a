use axum::{
    Router, middleware,
    routing::{any, get, post},
};
use oraimo_admin_server::{
    auth::{self, AppState},
    config::ServerConfig,
    proxy,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream.timeout_seconds))
        .build()
        .expect("failed to build upstream HTTP client");

    // Dashboard bundle; unknown paths fall back to index.html so
    // client-routed URLs resolve after a hard reload.
    let index = std::path::Path::new(&config.site_root).join("index.html");
    let assets = ServeDir::new(&config.site_root).not_found_service(ServeFile::new(index));

    let state = Arc::new(AppState::new(http, config));
    let listen_addr = state.config.listen_addr.clone();

    let app = Router::new()
        // Auth routes
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", get(auth::logout))
        // Upstream API proxy
        .route("/api/{*path}", any(proxy::forward))
        .fallback_service(assets)
        // Gate every route and the asset fallback on the session cookie
        .layer(middleware::from_fn(auth::session_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", listen_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
