//! История цен: `GET /api/price-history`

use async_trait::async_trait;

use contracts::domain::a002_price_history::{PriceHistoryEntry, PriceHistoryFilter};
use contracts::shared::list::{ListingQuery, Paginated};

use crate::shared::api_utils::{ApiClient, ApiError};
use crate::shared::list::ListSource;

const BASE_URL: &str = "/api/price-history";

pub async fn list_price_history(
    api: &ApiClient,
    query: &ListingQuery<PriceHistoryFilter>,
) -> Result<Paginated<PriceHistoryEntry>, ApiError> {
    api.get_page(BASE_URL, query).await
}

/// Rows keep the backend's newest-first order until a column is clicked
pub struct PriceHistoryListSource {
    api: ApiClient,
}

impl PriceHistoryListSource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ListSource for PriceHistoryListSource {
    type Record = PriceHistoryEntry;
    type Filter = PriceHistoryFilter;

    const TITLE: &'static str = "price history";

    async fn fetch(
        &self,
        query: &ListingQuery<PriceHistoryFilter>,
    ) -> Result<Paginated<PriceHistoryEntry>, ApiError> {
        list_price_history(&self.api, query).await
    }

    fn default_per_page() -> u32 {
        20
    }
}
