use serde::{Deserialize, Serialize};

/// Тело `PUT /api/products/{id}`: меняются только заданные поля
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrpc: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountUpdate {
    pub sku: String,
    pub discount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountUpdated {
    pub sku: String,
    pub discount: f64,
    #[serde(default)]
    pub old_price: Option<f64>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuError {
    pub sku: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountUpdateBatchResponse {
    pub status: String,
    #[serde(default)]
    pub updated: Vec<DiscountUpdated>,
    #[serde(default)]
    pub errors: Vec<SkuError>,
}

/// `POST /api/products/update-prices`; no ids means every active product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePricesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePricesResponse {
    pub status: String,
    pub updated: u64,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// Free-form `{status, message, ...}` answer of the action endpoints
/// (activate, deactivate, fetch, monitor).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
