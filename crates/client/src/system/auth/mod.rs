pub mod api;

pub use api::{login, logout, me, register};
