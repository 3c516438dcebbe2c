//! Dashboard client core: typed access to the price-sync API, the session
//! holder and the list/bulk-update logic the dashboard pages drive.

pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;

#[cfg(test)]
pub(crate) mod test_support;

pub use shared::api_utils::{ApiClient, ApiError, ClientConfig};
pub use shared::notify::{Notification, NotificationLevel, Notifier};
pub use system::session::Session;
