pub mod aggregate;
pub mod dto;
pub mod stats;

pub use aggregate::{Product, ProductFilter, ProductSortField, MRPC_DISCREPANCY_THRESHOLD};
pub use stats::ProductStats;
