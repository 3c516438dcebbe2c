use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};

use super::forward::{forward, ForwardRequest};
use crate::routes::AppState;

pub const PROXY_PREFIX: &str = "/api/proxy";

/// `/api/proxy/{path}` -> `{api_url}/api/{path}`
pub async fn proxy_api(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let suffix = uri.path().strip_prefix(PROXY_PREFIX).unwrap_or_default();
    relay(&state, method, format!("/api{}", suffix), &uri, &headers, body).await
}

/// `/api/auth/{path}` -> `{api_url}/api/auth/{path}`
pub async fn proxy_auth(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let upstream_path = uri.path().to_string();
    relay(&state, method, upstream_path, &uri, &headers, body).await
}

async fn relay(
    state: &AppState,
    method: Method,
    upstream_path: String,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> Response {
    let request = ForwardRequest::new(method, upstream_path, uri.query(), headers, body);
    let api_url = state.config.api_url();
    tracing::info!("Proxying {} request to: {}", request.method, request.upstream_url(api_url));

    let method = request.method.clone();
    let path = request.path.clone();
    match forward(&state.http, api_url, request).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!("Error proxying {} request to {}: {}", method, path, e);
            e.into_response()
        }
    }
}
