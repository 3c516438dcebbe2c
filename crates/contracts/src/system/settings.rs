use serde::{Deserialize, Serialize};

/// Настройки сервиса мониторинга (`GET /api/settings`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Minutes between monitoring runs
    pub monitoring_interval: u32,
    /// Minutes between price update runs
    pub price_update_interval: u32,
    pub ozon_client_id: String,
    pub ozon_api_key: String,
    pub front_price_api_url: String,
    pub secret_key: String,
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub next_update: Option<String>,
}

/// Тело `PUT /api/settings`: отправляются только изменённые поля
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_update_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ozon_client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ozon_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_price_api_url: Option<String>,
}

impl SettingsUpdate {
    /// Fields of `edited` that differ from `current`
    pub fn diff(current: &Settings, edited: &Settings) -> Self {
        fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<T> {
            (a != b).then(|| b.clone())
        }

        Self {
            monitoring_interval: changed(&current.monitoring_interval, &edited.monitoring_interval),
            price_update_interval: changed(
                &current.price_update_interval,
                &edited.price_update_interval,
            ),
            ozon_client_id: changed(&current.ozon_client_id, &edited.ozon_client_id),
            ozon_api_key: changed(&current.ozon_api_key, &edited.ozon_api_key),
            front_price_api_url: changed(&current.front_price_api_url, &edited.front_price_api_url),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// `POST /api/settings/generate-secret`, superuser only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSecret {
    pub status: String,
    pub secret_key: String,
}
