use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::list::{ListFilter, ListRecord, SortKey, Sortable};

/// Запись журнала обращений backend к API маркетплейса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiLogEntry {
    pub id: i64,
    pub endpoint: String,
    pub method: String,
    pub timestamp: String,
    /// Seconds
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub products_count: Option<i64>,
    #[serde(default)]
    pub request_payload: Option<String>,
    #[serde(default)]
    pub response_payload: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiLogSortField {
    Timestamp,
    Endpoint,
    Method,
    StatusCode,
    ResponseTime,
}

impl Sortable for ApiLogEntry {
    type Field = ApiLogSortField;

    fn sort_key(&self, field: ApiLogSortField) -> SortKey<'_> {
        match field {
            ApiLogSortField::Timestamp => SortKey::Text(&self.timestamp),
            ApiLogSortField::Endpoint => SortKey::Text(&self.endpoint),
            ApiLogSortField::Method => SortKey::Text(&self.method),
            ApiLogSortField::StatusCode => self.status_code.map(f64::from).into(),
            ApiLogSortField::ResponseTime => self.response_time.into(),
        }
    }
}

impl ListRecord for ApiLogEntry {
    type Id = i64;

    fn record_id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLogFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl ListFilter for ApiLogFilter {}
