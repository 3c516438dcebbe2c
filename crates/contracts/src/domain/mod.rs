pub mod a001_product;
pub mod a002_price_history;
pub mod a003_api_log;
