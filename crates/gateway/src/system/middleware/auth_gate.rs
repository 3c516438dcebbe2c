//! Page-level login gate.
//!
//! Only checks that an `auth_token` cookie is present; the token itself is
//! validated by the API on the first proxied call.

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

pub const AUTH_COOKIE: &str = "auth_token";

const PREFETCH_HEADER: &str = "x-middleware-prefetch";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Redirect(&'static str),
}

/// `/`, `/login`, `/register`, the API and static assets are open
pub fn is_public_path(path: &str) -> bool {
    matches!(path, "/" | "/login" | "/register")
        || path.starts_with("/api/")
        || is_static_asset(path)
}

/// Bundle files (`/pkg/app.wasm`, `/favicon.ico`, ...) have an extension in
/// their last segment, page routes do not
fn is_static_asset(path: &str) -> bool {
    path.starts_with("/assets/")
        || path.starts_with("/pkg/")
        || path.rsplit('/').next().is_some_and(|last| last.contains('.'))
}

pub fn auth_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn decide(path: &str, has_token: bool, is_prefetch: bool) -> GateDecision {
    if !is_public_path(path) && !has_token {
        return GateDecision::Redirect("/login");
    }
    if matches!(path, "/login" | "/register") && has_token && !is_prefetch {
        return GateDecision::Redirect("/dashboard");
    }
    GateDecision::Pass
}

pub async fn auth_gate(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let has_token = auth_cookie(req.headers()).is_some();
    let is_prefetch = req.headers().contains_key(PREFETCH_HEADER);

    match decide(&path, has_token, is_prefetch) {
        GateDecision::Pass => next.run(req).await,
        GateDecision::Redirect(to) => {
            tracing::debug!("auth gate: {} -> {}", path, to);
            Redirect::temporary(to).into_response()
        }
    }
}
