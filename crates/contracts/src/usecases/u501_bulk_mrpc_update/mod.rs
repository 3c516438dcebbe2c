//! u501: массовое обновление МРЦ из вставленной таблицы SKU/цена

pub mod parser;
pub mod request;
pub mod response;

pub use parser::{parse_bulk_mrpc, BulkParseOutcome, LineError, LineErrorKind};
pub use request::BulkPriceUpdateRecord;
pub use response::{MrpcUpdateBatchResponse, MrpcUpdated};
