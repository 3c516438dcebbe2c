pub mod auth;
pub mod session;
pub mod settings;
pub mod token_storage;
