use serde::{Deserialize, Serialize};

use crate::shared::list::query::non_blank;
use crate::shared::list::{ListFilter, ListRecord, SortKey, Sortable};

/// Difference between price and MRPC that the product table highlights
pub const MRPC_DISCREPANCY_THRESHOLD: f64 = 100.0;

// ============================================================================
// Product
// ============================================================================

/// Товар под мониторингом (как его отдаёт backend в `GET /api/products`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Row id in the price-sync backend
    pub id: i64,

    /// Marketplace product id
    pub product_id: String,

    pub sku: String,

    pub name: String,

    /// Monitoring switched on
    #[serde(default)]
    pub active: bool,

    /// In stock
    #[serde(default = "default_true")]
    pub available: bool,

    #[serde(default)]
    pub price: Option<f64>,

    /// Previous (crossed-out) price
    #[serde(default)]
    pub old_price: Option<f64>,

    #[serde(default)]
    pub marketing_price: Option<f64>,

    #[serde(default)]
    pub min_price: Option<f64>,

    /// Price seen on the storefront
    #[serde(default)]
    pub front_price: Option<f64>,

    /// Минимальная рекомендованная розничная цена (МРЦ)
    #[serde(default)]
    pub mrpc: Option<f64>,

    /// Discount in percent, 0..=100
    #[serde(default)]
    pub discount: f64,

    #[serde(default)]
    pub product_url: Option<String>,

    #[serde(default)]
    pub front_price_timestamp: Option<String>,

    #[serde(default)]
    pub update_timestamp: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Price and MRPC both known and more than the threshold apart.
    /// Display-only flag, the backend stores no such invariant.
    pub fn has_mrpc_discrepancy(&self) -> bool {
        match (self.price, self.mrpc) {
            (Some(price), Some(mrpc)) => (mrpc - price).abs() > MRPC_DISCREPANCY_THRESHOLD,
            _ => false,
        }
    }
}

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSortField {
    Name,
    Price,
    Mrpc,
    Discount,
    Sku,
    Id,
}

impl Sortable for Product {
    type Field = ProductSortField;

    fn sort_key(&self, field: ProductSortField) -> SortKey<'_> {
        match field {
            ProductSortField::Name => SortKey::Text(&self.name),
            ProductSortField::Price => self.price.into(),
            ProductSortField::Mrpc => self.mrpc.into(),
            ProductSortField::Discount => SortKey::Number(self.discount),
            ProductSortField::Sku => SortKey::Text(&self.sku),
            ProductSortField::Id => SortKey::Number(self.id as f64),
        }
    }
}

impl ListRecord for Product {
    type Id = i64;

    fn record_id(&self) -> i64 {
        self.id
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Фильтры списка товаров (`None` = без ограничения)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_stock: Option<bool>,
}

impl ListFilter for ProductFilter {
    fn normalized(&self) -> Self {
        Self {
            search: non_blank(&self.search),
            active: self.active,
            has_stock: self.has_stock,
        }
    }
}
