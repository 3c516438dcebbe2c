//! Products API: list, per-product actions and marketplace sync triggers.

use contracts::domain::a001_product::dto::{
    ActionResponse, DiscountUpdate, DiscountUpdateBatchResponse, ProductUpdate,
    UpdatePricesRequest, UpdatePricesResponse,
};
use contracts::domain::a001_product::{Product, ProductFilter, ProductStats};
use contracts::shared::list::{ListingQuery, Paginated, MAX_PER_PAGE};
use contracts::usecases::u501_bulk_mrpc_update::{BulkPriceUpdateRecord, MrpcUpdateBatchResponse};

use crate::shared::api_utils::{ApiClient, ApiError};

const BASE_URL: &str = "/api/products";

/// Dashboard cards look at no more than this many products
pub const STATS_PRODUCT_LIMIT: usize = 1000;

// ============================================================================
// Listing
// ============================================================================

pub async fn list_products(
    api: &ApiClient,
    query: &ListingQuery<ProductFilter>,
) -> Result<Paginated<Product>, ApiError> {
    api.get_page(BASE_URL, query).await
}

/// Counters for the dashboard cards.
///
/// `per_page` is capped server-side, so this walks pages of the maximum
/// size until everything (or `STATS_PRODUCT_LIMIT`) is collected.
pub async fn load_stats(api: &ApiClient) -> Result<ProductStats, ApiError> {
    let mut products: Vec<Product> = Vec::new();
    let mut page = 1;

    loop {
        let query = ListingQuery::new(page, MAX_PER_PAGE, ProductFilter::default());
        let batch = list_products(api, &query).await?;
        let has_next = batch.has_next();
        let received = batch.items.len();
        products.extend(batch.items);

        if !has_next || received == 0 || products.len() >= STATS_PRODUCT_LIMIT {
            break;
        }
        page += 1;
    }

    products.truncate(STATS_PRODUCT_LIMIT);
    Ok(ProductStats::from_products(&products))
}

// ============================================================================
// Single product (keyed by the marketplace product_id)
// ============================================================================

pub async fn activate_product(api: &ApiClient, product_id: &str) -> Result<ActionResponse, ApiError> {
    api.post_empty(&format!("{}/{}/activate", BASE_URL, product_id))
        .await
}

pub async fn deactivate_product(
    api: &ApiClient,
    product_id: &str,
) -> Result<ActionResponse, ApiError> {
    api.post_empty(&format!("{}/{}/deactivate", BASE_URL, product_id))
        .await
}

/// Flip monitoring for `product`; returns the new `active` value
pub async fn toggle_active(api: &ApiClient, product: &Product) -> Result<bool, ApiError> {
    if product.active {
        deactivate_product(api, &product.product_id).await?;
        Ok(false)
    } else {
        activate_product(api, &product.product_id).await?;
        Ok(true)
    }
}

pub async fn update_product(
    api: &ApiClient,
    product_id: &str,
    update: &ProductUpdate,
) -> Result<ActionResponse, ApiError> {
    api.put(&format!("{}/{}", BASE_URL, product_id), update)
        .await
}

// ============================================================================
// Bulk updates
// ============================================================================

pub async fn set_mrpc(
    api: &ApiClient,
    records: &[BulkPriceUpdateRecord],
) -> Result<MrpcUpdateBatchResponse, ApiError> {
    api.post(&format!("{}/set-mrpc", BASE_URL), records).await
}

pub async fn set_discount(
    api: &ApiClient,
    records: &[DiscountUpdate],
) -> Result<DiscountUpdateBatchResponse, ApiError> {
    api.post(&format!("{}/set-discount", BASE_URL), records)
        .await
}

// ============================================================================
// Marketplace sync triggers
// ============================================================================

/// Pull the catalogue from the marketplace
pub async fn fetch_from_marketplace(api: &ApiClient) -> Result<ActionResponse, ApiError> {
    api.get(&format!("{}/fetch", BASE_URL)).await
}

/// Refresh storefront prices of active products
pub async fn fetch_front_prices(api: &ApiClient) -> Result<ActionResponse, ApiError> {
    api.post_empty(&format!("{}/fetch-prices", BASE_URL)).await
}

/// Push recalculated prices; `None` means every active product
pub async fn update_prices(
    api: &ApiClient,
    product_ids: Option<Vec<String>>,
) -> Result<UpdatePricesResponse, ApiError> {
    api.post(
        &format!("{}/update-prices", BASE_URL),
        &UpdatePricesRequest { product_ids },
    )
    .await
}

pub async fn monitor_products(api: &ApiClient) -> Result<ActionResponse, ApiError> {
    api.post_empty(&format!("{}/monitor", BASE_URL)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_for, spawn_backend};
    use axum::extract::{Path, Query};
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn product_json(id: i64, active: bool, discount: f64) -> Value {
        json!({
            "id": id,
            "product_id": format!("P{}", id),
            "sku": format!("SKU-{}", id),
            "name": format!("Product {}", id),
            "active": active,
            "discount": discount,
            "mrpc": null,
        })
    }

    #[tokio::test]
    async fn test_list_sends_only_set_filters() {
        let router = Router::new().route(
            "/api/products",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let mut keys: Vec<_> = params.keys().cloned().collect();
                keys.sort();
                assert_eq!(keys, vec!["active", "page", "per_page"]);
                Json(json!({
                    "items": [product_json(1, true, 0.0)],
                    "total": 1,
                    "page": 1,
                    "pages": 1,
                }))
            }),
        );
        let base = spawn_backend(router).await;
        let (api, _) = client_for(&base);

        let filter = ProductFilter {
            search: Some("  ".into()),
            active: Some(true),
            has_stock: None,
        };
        let page = list_products(&api, &ListingQuery::new(1, 10, filter))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].product_id, "P1");
    }

    #[tokio::test]
    async fn test_stats_walk_all_pages() {
        let router = Router::new().route(
            "/api/products",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["per_page"], "100");
                let page: u32 = params["page"].parse().unwrap();
                let items = match page {
                    1 => vec![product_json(1, true, 10.0), product_json(2, false, 0.0)],
                    _ => vec![product_json(3, true, 15.0)],
                };
                Json(json!({ "items": items, "total": 3, "page": page, "pages": 2 }))
            }),
        );
        let base = spawn_backend(router).await;
        let (api, _) = client_for(&base);

        let stats = load_stats(&api).await.unwrap();
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.active_products, 2);
        assert_eq!(stats.inactive_products, 1);
        assert_eq!(stats.average_discount, 12.5);
    }

    #[tokio::test]
    async fn test_toggle_uses_product_id() {
        let router = Router::new()
            .route(
                "/api/products/:product_id/activate",
                post(|Path(id): Path<String>| async move {
                    Json(json!({"status": "success", "message": format!("{} activated", id)}))
                }),
            )
            .route(
                "/api/products/:product_id/deactivate",
                post(|Path(id): Path<String>| async move {
                    Json(json!({"status": "success", "message": format!("{} deactivated", id)}))
                }),
            );
        let base = spawn_backend(router).await;
        let (api, _) = client_for(&base);

        let product: Product = serde_json::from_value(product_json(7, false, 0.0)).unwrap();
        assert!(toggle_active(&api, &product).await.unwrap());

        let response = deactivate_product(&api, "P7").await.unwrap();
        assert_eq!(response.message.as_deref(), Some("P7 deactivated"));
    }

    #[tokio::test]
    async fn test_update_product_omits_unset_fields() {
        let router = Router::new().route(
            "/api/products/:product_id",
            put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                assert_eq!(id, "P3");
                assert_eq!(body, json!({"mrpc": 1999.0}));
                Json(json!({"status": "success", "message": "Product updated"}))
            }),
        );
        let base = spawn_backend(router).await;
        let (api, _) = client_for(&base);

        let update = ProductUpdate {
            mrpc: Some(1999.0),
            ..Default::default()
        };
        let response = update_product(&api, "P3", &update).await.unwrap();
        assert_eq!(response.status.as_deref(), Some("success"));
    }

    #[tokio::test]
    async fn test_update_prices_all_products() {
        let router = Router::new().route(
            "/api/products/update-prices",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({}));
                Json(json!({"status": "success", "updated": 4, "errors": []}))
            }),
        );
        let base = spawn_backend(router).await;
        let (api, _) = client_for(&base);

        let response = update_prices(&api, None).await.unwrap();
        assert_eq!(response.updated, 4);
    }

    #[tokio::test]
    async fn test_set_discount_posts_records() {
        let router = Router::new().route(
            "/api/products/set-discount",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(
                    body,
                    json!([{"sku": "SKU-1", "discount": 15.0}, {"sku": "SKU-2", "discount": 0.0}])
                );
                Json(json!({
                    "status": "success",
                    "updated": [{"sku": "SKU-1", "discount": 15.0, "old_price": 990.0, "message": "ok"}],
                    "errors": [{"sku": "SKU-2", "error": "Product not found"}],
                }))
            }),
        );
        let base = spawn_backend(router).await;
        let (api, _) = client_for(&base);

        let records = vec![
            DiscountUpdate { sku: "SKU-1".into(), discount: 15.0 },
            DiscountUpdate { sku: "SKU-2".into(), discount: 0.0 },
        ];
        let response = set_discount(&api, &records).await.unwrap();
        assert_eq!(response.updated.len(), 1);
        assert_eq!(response.updated[0].old_price, Some(990.0));
        assert_eq!(response.errors[0].sku, "SKU-2");
    }

    #[tokio::test]
    async fn test_sync_triggers_hit_their_routes() {
        // `/fetch` is a GET, the other triggers are bodyless POSTs
        let router = Router::new()
            .route(
                "/api/products/fetch",
                get(|| async { Json(json!({"status": "success", "message": "fetched", "count": 12})) }),
            )
            .route(
                "/api/products/fetch-prices",
                post(|body: String| async move {
                    assert!(body.is_empty());
                    Json(json!({"status": "success", "message": "prices"}))
                }),
            )
            .route(
                "/api/products/monitor",
                post(|body: String| async move {
                    assert!(body.is_empty());
                    Json(json!({"status": "success", "message": "monitored"}))
                }),
            );
        let base = spawn_backend(router).await;
        let (api, _) = client_for(&base);

        let fetched = fetch_from_marketplace(&api).await.unwrap();
        assert_eq!(fetched.message.as_deref(), Some("fetched"));
        assert_eq!(fetched.extra["count"], 12);

        let prices = fetch_front_prices(&api).await.unwrap();
        assert_eq!(prices.message.as_deref(), Some("prices"));

        let monitored = monitor_products(&api).await.unwrap();
        assert_eq!(monitored.message.as_deref(), Some("monitored"));
    }
}
