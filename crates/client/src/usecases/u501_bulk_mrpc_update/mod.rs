pub mod executor;

pub use executor::{BulkMrpcExecutor, BulkUpdateResult, MrpcSink};
