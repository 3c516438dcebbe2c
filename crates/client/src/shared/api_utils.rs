//! API utilities for dashboard-backend communication
//!
//! `ApiClient` is the single way the dashboard talks to the price-sync API:
//! it owns the HTTP client (fixed timeout), prefixes the base URL and
//! attaches the session's bearer token.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use contracts::shared::list::{ListFilter, ListingQuery};

use crate::system::session::Session;

/// Every call is aborted after this long
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Gateway routes: `/api/proxy/{x}` reaches `/api/{x}` upstream,
/// `/api/auth/{x}` is passed through as is
const GATEWAY_PROXY_PREFIX: &str = "/api/proxy/";
const AUTH_PREFIX: &str = "/api/auth/";

/// Ошибки обращения к API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request timed out")]
    Timeout,

    #[error("API server is unreachable")]
    Unreachable,

    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {detail}")]
    Status { status: u16, detail: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request failed: {0}")]
    Transport(String),
}

impl ApiError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unreachable
        } else {
            ApiError::Transport(err.to_string())
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, or the gateway origin when `via_gateway` is set
    pub base_url: String,
    pub timeout: Duration,
    /// Rewrite `/api/...` paths onto the gateway's `/api/proxy/...` routes
    pub via_gateway: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            via_gateway: false,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Talk to the API through the same-origin gateway at `origin`
    pub fn via_gateway(origin: impl Into<String>) -> Self {
        Self {
            base_url: origin.into(),
            via_gateway: true,
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    via_gateway: bool,
    session: Session,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            via_gateway: config.via_gateway,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build a full API URL from a path
    ///
    /// # Example
    /// ```ignore
    /// let url = api.url("/api/products");
    /// ```
    pub fn url(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        format!("{}{}", self.base_url, self.route(path))
    }

    fn route(&self, path: String) -> String {
        if !self.via_gateway || path.starts_with(AUTH_PREFIX) {
            return path;
        }
        match path.strip_prefix("/api/") {
            Some(rest) => format!("{}{}", GATEWAY_PROXY_PREFIX, rest),
            None => path,
        }
    }

    /// Request with the bearer token of the current session, if any
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// GET a list page; unset filter fields never reach the query string
    pub async fn get_page<T, F>(&self, path: &str, query: &ListingQuery<F>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: ListFilter,
    {
        let qs = query
            .to_query_string()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.get(&format!("{}?{}", path, qs)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    /// POST without a body (action endpoints)
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::POST, path)).await
    }

    /// POST `application/x-www-form-urlencoded`
    pub async fn post_form<T, B>(&self, path: &str, form: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.request(Method::POST, path).form(form)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    /// Send and decode. Non-2xx statuses become `ApiError` with the backend's
    /// own message; nothing is retried.
    pub async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            let detail = error_detail(status, &body);
            tracing::warn!("API request failed with status {}: {}", status, detail);
            if status == StatusCode::UNAUTHORIZED {
                return Err(ApiError::Unauthorized(detail));
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        // 204 and friends: decode as JSON null so `()`/Option targets work
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            tracing::error!("Failed to parse API response: {}. Body: {}", e, preview);
            ApiError::Decode(e.to_string())
        })
    }
}

/// Human-readable message out of an error body: `detail`, `message` or
/// `error` of a JSON object, else the raw text, else the status reason.
pub fn error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            match map.get(key) {
                Some(serde_json::Value::String(s)) => return s.clone(),
                Some(serde_json::Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.chars().take(200).collect();
    }

    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
