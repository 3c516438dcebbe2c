pub mod api;

pub use api::{list_api_logs, ApiLogListSource};
