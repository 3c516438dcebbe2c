use serde::{Deserialize, Serialize};

/// One element of the `POST /api/products/set-mrpc` body.
/// Only the parser builds these, so `sku` is non-empty and `mrpc > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkPriceUpdateRecord {
    pub sku: String,
    pub mrpc: f64,
}
