use serde::{Deserialize, Serialize};

use super::aggregate::Product;

/// Карточки дашборда
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductStats {
    pub total_products: usize,
    pub active_products: usize,
    pub inactive_products: usize,
    /// Mean over products with a positive discount, one decimal
    pub average_discount: f64,
}

impl ProductStats {
    pub fn from_products(products: &[Product]) -> Self {
        let active = products.iter().filter(|p| p.active).count();

        let (sum, count) = products
            .iter()
            .filter(|p| p.discount > 0.0)
            .fold((0.0, 0usize), |(sum, count), p| (sum + p.discount, count + 1));

        let average_discount = if count > 0 {
            (sum / count as f64 * 10.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            total_products: products.len(),
            active_products: active,
            inactive_products: products.len() - active,
            average_discount,
        }
    }
}
