//! Настройки мониторинга: чтение, сохранение изменённых полей, новый секрет

use contracts::domain::a001_product::dto::ActionResponse;
use contracts::system::settings::{GeneratedSecret, Settings, SettingsUpdate};

use crate::shared::api_utils::{ApiClient, ApiError};

const BASE_URL: &str = "/api/settings";

pub async fn get_settings(api: &ApiClient) -> Result<Settings, ApiError> {
    api.get(BASE_URL).await
}

pub async fn update_settings(api: &ApiClient, update: &SettingsUpdate) -> Result<ActionResponse, ApiError> {
    api.put(BASE_URL, update).await
}

/// Save the form: only fields that differ from `current` are sent.
/// Returns `None` when nothing changed and no request was made.
pub async fn save_settings(
    api: &ApiClient,
    current: &Settings,
    edited: &Settings,
) -> Result<Option<ActionResponse>, ApiError> {
    let update = SettingsUpdate::diff(current, edited);
    if update.is_empty() {
        return Ok(None);
    }
    update_settings(api, &update).await.map(Some)
}

pub async fn generate_secret(api: &ApiClient) -> Result<GeneratedSecret, ApiError> {
    api.post_empty(&format!("{}/generate-secret", BASE_URL)).await
}
