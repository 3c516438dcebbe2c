pub mod api_utils;
pub mod list;
pub mod notify;
