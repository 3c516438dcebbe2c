use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::routes::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Online,
    Error,
    Offline,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub environment: &'static str,
    pub api_url: String,
    pub api_status: ApiStatus,
    pub api_message: String,
}

/// GET /api/health
///
/// The gateway itself is always "ok"; the API part reflects a probe of
/// `{api_url}/api/health` with the short health timeout.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let api_url = state.config.api_url().to_string();
    let (api_status, api_message) = probe(&state.health_http, &api_url).await;

    Json(HealthReport {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        environment: if cfg!(debug_assertions) {
            "development"
        } else {
            "production"
        },
        api_url,
        api_status,
        api_message,
    })
}

pub async fn probe(http: &reqwest::Client, api_url: &str) -> (ApiStatus, String) {
    match http.get(format!("{}/api/health", api_url)).send().await {
        Ok(response) if response.status().is_success() => (
            ApiStatus::Online,
            "API server is online and responding".to_string(),
        ),
        Ok(response) => (
            ApiStatus::Error,
            format!("API server returned status {}", response.status().as_u16()),
        ),
        Err(e) => {
            tracing::warn!("API health probe failed: {}", e);
            (ApiStatus::Offline, e.to_string())
        }
    }
}
