pub mod aggregate;

pub use aggregate::{PriceHistoryEntry, PriceHistoryFilter, PriceHistorySortField};
