use async_trait::async_trait;

use contracts::domain::a001_product::{Product, ProductFilter, ProductSortField};
use contracts::shared::list::{ListingQuery, Paginated, SortSpec};

use super::api;
use crate::shared::api_utils::{ApiClient, ApiError};
use crate::shared::list::{ListSource, ListingController};
use crate::shared::notify::Notification;

pub struct ProductListSource {
    api: ApiClient,
}

impl ProductListSource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[async_trait]
impl ListSource for ProductListSource {
    type Record = Product;
    type Filter = ProductFilter;

    const TITLE: &'static str = "products";

    async fn fetch(&self, query: &ListingQuery<ProductFilter>) -> Result<Paginated<Product>, ApiError> {
        api::list_products(&self.api, query).await
    }

    fn default_sort() -> Option<SortSpec<ProductSortField>> {
        Some(SortSpec::new(ProductSortField::Name))
    }
}

pub type ProductListController = ListingController<ProductListSource>;

/// Toggle monitoring of one loaded row and patch it in place.
/// Errors are reported through the controller's notifier.
pub async fn toggle_product_active(ctl: &mut ProductListController, id: i64) -> Result<bool, ApiError> {
    let Some(product) = ctl.find(&id).cloned() else {
        return Err(ApiError::InvalidRequest(format!("product {} is not loaded", id)));
    };

    match api::toggle_active(ctl.source().api(), &product).await {
        Ok(active) => {
            ctl.update_item(&id, |p| p.active = active);
            let verb = if active { "activated" } else { "deactivated" };
            ctl.notifier().notify(Notification::success(
                "Product updated",
                format!("Product {} successfully", verb),
            ));
            Ok(active)
        }
        Err(e) => {
            tracing::error!("Failed to toggle product {}: {}", product.product_id, e);
            ctl.notifier().notify(Notification::error(
                "Failed to update product status",
                e.to_string(),
            ));
            Err(e)
        }
    }
}
