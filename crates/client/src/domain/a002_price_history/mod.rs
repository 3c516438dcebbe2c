pub mod api;

pub use api::{list_price_history, PriceHistoryListSource};
