use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::list::query::non_blank;
use crate::shared::list::{ListFilter, ListRecord, SortKey, Sortable};

/// Запись истории изменения цены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryEntry {
    pub id: i64,
    pub product_id: String,
    /// ISO-8601 as sent by the backend
    pub timestamp: String,
    #[serde(default)]
    pub showcase_price: Option<f64>,
    #[serde(default)]
    pub old_price: Option<f64>,
    #[serde(default)]
    pub new_price: Option<f64>,
}

impl PriceHistoryEntry {
    /// new - old, when both prices are recorded
    pub fn price_change(&self) -> Option<f64> {
        Some(self.new_price? - self.old_price?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceHistorySortField {
    Timestamp,
    ProductId,
    ShowcasePrice,
    OldPrice,
    NewPrice,
}

impl Sortable for PriceHistoryEntry {
    type Field = PriceHistorySortField;

    fn sort_key(&self, field: PriceHistorySortField) -> SortKey<'_> {
        match field {
            PriceHistorySortField::Timestamp => SortKey::Text(&self.timestamp),
            PriceHistorySortField::ProductId => SortKey::Text(&self.product_id),
            PriceHistorySortField::ShowcasePrice => self.showcase_price.into(),
            PriceHistorySortField::OldPrice => self.old_price.into(),
            PriceHistorySortField::NewPrice => self.new_price.into(),
        }
    }
}

impl ListRecord for PriceHistoryEntry {
    type Id = i64;

    fn record_id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistoryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ListFilter for PriceHistoryFilter {
    fn normalized(&self) -> Self {
        Self {
            product_id: non_blank(&self.product_id),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
