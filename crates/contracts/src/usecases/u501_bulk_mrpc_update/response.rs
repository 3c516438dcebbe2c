use serde::{Deserialize, Serialize};

use crate::domain::a001_product::dto::SkuError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MrpcUpdated {
    pub sku: String,
    pub mrpc: f64,
    pub message: String,
}

/// Ответ backend на пакет МРЦ. Backend may still refuse single SKUs
/// (unknown SKU); those come back in `errors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MrpcUpdateBatchResponse {
    pub status: String,
    #[serde(default)]
    pub updated: Vec<MrpcUpdated>,
    #[serde(default)]
    pub errors: Vec<SkuError>,
}
