//! Stateless forwarding of one dashboard call to the price-sync API.
//!
//! Everything the call needs travels in `ForwardRequest`; the upstream
//! answer comes back untouched (status, content type, body). Transport
//! failures collapse into three kinds with fixed HTTP statuses.

use axum::body::Bytes;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

const DEFAULT_REQUEST_CONTENT_TYPE: &str = "application/json";
const DEFAULT_RESPONSE_CONTENT_TYPE: &str = "text/plain";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("API request timed out")]
    Timeout,

    #[error("API server is unreachable")]
    Unreachable,

    #[error("API error: {0}")]
    Other(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Unreachable => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Timeout
        } else if err.is_connect() {
            ProxyError::Unreachable
        } else {
            ProxyError::Other(err.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    /// Upstream path, e.g. `/api/products/123/activate`
    pub path: String,
    /// Raw query string without `?`
    pub query: Option<String>,
    pub authorization: Option<HeaderValue>,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl ForwardRequest {
    /// Take what is forwarded from the incoming headers; anything else
    /// (cookies, host, ...) stays at the gateway
    pub fn new(method: Method, path: String, query: Option<&str>, headers: &HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            path,
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
            authorization: headers.get(AUTHORIZATION).cloned(),
            content_type: headers.get(CONTENT_TYPE).cloned(),
            body,
        }
    }

    pub fn upstream_url(&self, api_url: &str) -> String {
        match &self.query {
            Some(query) => format!("{}{}?{}", api_url, self.path, query),
            None => format!("{}{}", api_url, self.path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub body: Bytes,
}

impl IntoResponse for ForwardedResponse {
    fn into_response(self) -> Response {
        (self.status, [(CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

pub async fn forward(
    http: &reqwest::Client,
    api_url: &str,
    request: ForwardRequest,
) -> Result<ForwardedResponse, ProxyError> {
    let url = request.upstream_url(api_url);

    let content_type = request
        .content_type
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_REQUEST_CONTENT_TYPE));
    let mut builder = http
        .request(request.method, &url)
        .header(CONTENT_TYPE, content_type);
    if let Some(auth) = request.authorization {
        builder = builder.header(AUTHORIZATION, auth);
    }
    if !request.body.is_empty() {
        builder = builder.body(request.body);
    }

    let response = builder.send().await.map_err(ProxyError::from_reqwest)?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_RESPONSE_CONTENT_TYPE));
    let body = response.bytes().await.map_err(ProxyError::from_reqwest)?;

    Ok(ForwardedResponse {
        status,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::extract::RawQuery;
    use axum::routing::{get, post};
    use axum::Router;
    use std::time::Duration;

    fn request(method: Method, path: &str, query: Option<&str>, body: &'static [u8]) -> ForwardRequest {
        ForwardRequest::new(method, path.to_string(), query, &HeaderMap::new(), Bytes::from_static(body))
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(ProxyError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(ProxyError::Unreachable.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ProxyError::Other("boom".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ProxyError::Other("boom".into()).to_string(), "API error: boom");
    }

    #[test]
    fn test_upstream_url() {
        let r = request(Method::GET, "/api/products", Some("page=2&active=true"), b"");
        assert_eq!(r.upstream_url("http://api:8000"), "http://api:8000/api/products?page=2&active=true");

        let r = request(Method::GET, "/api/settings", Some(""), b"");
        assert_eq!(r.upstream_url("http://api:8000"), "http://api:8000/api/settings");
    }

    #[tokio::test]
    async fn test_status_and_content_type_pass_through() {
        let upstream = Router::new()
            .route(
                "/api/products/P1",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        [(CONTENT_TYPE, "application/json")],
                        r#"{"detail":"Product not found"}"#,
                    )
                }),
            )
            .route("/api/echo", get(|RawQuery(q): RawQuery| async move { q.unwrap_or_default() }));
        let base = spawn_upstream(upstream).await;
        let http = reqwest::Client::new();

        let response = forward(&http, &base, request(Method::GET, "/api/products/P1", None, b""))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.content_type, "application/json");
        assert_eq!(&response.body[..], br#"{"detail":"Product not found"}"#);

        let response = forward(&http, &base, request(Method::GET, "/api/echo", Some("a=1&b=2"), b""))
            .await
            .unwrap();
        assert_eq!(&response.body[..], b"a=1&b=2");
        assert!(response.content_type.to_str().unwrap().starts_with("text/plain"));
    }

    #[tokio::test]
    async fn test_form_body_forwarded_unchanged() {
        let upstream = Router::new().route(
            "/api/auth/login",
            post(|headers: HeaderMap, body: Bytes| async move {
                let ct = headers[CONTENT_TYPE].to_str().unwrap().to_string();
                format!("{}|{}", ct, String::from_utf8_lossy(&body))
            }),
        );
        let base = spawn_upstream(upstream).await;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/x-www-form-urlencoded"));
        let req = ForwardRequest::new(
            Method::POST,
            "/api/auth/login".into(),
            None,
            &headers,
            Bytes::from_static(b"username=admin&password=p%40ss"),
        );

        let response = forward(&reqwest::Client::new(), &base, req).await.unwrap();
        assert_eq!(
            &response.body[..],
            b"application/x-www-form-urlencoded|username=admin&password=p%40ss"
        );
    }

    #[tokio::test]
    async fn test_timeout_and_unreachable() {
        let upstream = Router::new().route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let base = spawn_upstream(upstream).await;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();

        let err = forward(&http, &base, request(Method::GET, "/api/slow", None, b""))
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Timeout), "{:?}", err);

        let err = forward(&http, "http://127.0.0.1:9", request(Method::GET, "/api/x", None, b""))
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Unreachable), "{:?}", err);
    }
}
