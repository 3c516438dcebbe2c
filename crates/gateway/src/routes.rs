use axum::http::{header, Method};
use axum::routing::get;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::proxy::handlers::{proxy_api, proxy_auth};
use crate::shared::config::Config;
use crate::system;

/// Shared by all handlers: configuration and the two upstream clients
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Proxied calls, `upstream.timeout_secs`
    pub http: reqwest::Client,
    /// Health probe, `upstream.health_timeout_secs`
    pub health_http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .build()?;
        let health_http = reqwest::Client::builder()
            .timeout(config.health_timeout())
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
            health_http,
        })
    }
}

/// Конфигурация всех роутов gateway
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let static_dir = state.config.static_dir();

    let router = Router::new()
        .route("/api/health", get(system::handlers::health::health))
        // ========================================
        // PROXY TO PRICE-SYNC API
        // ========================================
        .route(
            "/api/proxy/*path",
            get(proxy_api)
                .post(proxy_api)
                .put(proxy_api)
                .patch(proxy_api)
                .delete(proxy_api),
        )
        .route(
            "/api/auth/*path",
            get(proxy_auth)
                .post(proxy_auth)
                .put(proxy_auth)
                .patch(proxy_auth)
                .delete(proxy_auth),
        );

    let router = match static_dir {
        Some(dir) => {
            tracing::info!("Serving dashboard files from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    };

    router
        .with_state(state)
        .layer(middleware::from_fn(system::middleware::auth_gate::auth_gate))
        .layer(middleware::from_fn(system::middleware::request_logger::request_logger))
        .layer(cors)
}
