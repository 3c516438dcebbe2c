pub mod forward;
pub mod handlers;
