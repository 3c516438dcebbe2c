pub mod aggregate;

pub use aggregate::{ApiLogEntry, ApiLogFilter, ApiLogSortField};
