//! Журнал обращений backend к API маркетплейса

use async_trait::async_trait;

use contracts::domain::a003_api_log::{ApiLogEntry, ApiLogFilter};
use contracts::shared::list::{ListingQuery, Paginated};

use crate::shared::api_utils::{ApiClient, ApiError};
use crate::shared::list::ListSource;

const BASE_URL: &str = "/api/api-logs";

pub async fn list_api_logs(
    api: &ApiClient,
    query: &ListingQuery<ApiLogFilter>,
) -> Result<Paginated<ApiLogEntry>, ApiError> {
    api.get_page(BASE_URL, query).await
}

pub struct ApiLogListSource {
    api: ApiClient,
}

impl ApiLogListSource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ListSource for ApiLogListSource {
    type Record = ApiLogEntry;
    type Filter = ApiLogFilter;

    const TITLE: &'static str = "API logs";

    async fn fetch(&self, query: &ListingQuery<ApiLogFilter>) -> Result<Paginated<ApiLogEntry>, ApiError> {
        list_api_logs(&self.api, query).await
    }

    fn default_per_page() -> u32 {
        20
    }
}
