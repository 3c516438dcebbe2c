use async_trait::async_trait;
use std::sync::Arc;

use contracts::usecases::u501_bulk_mrpc_update::{
    parse_bulk_mrpc, BulkParseOutcome, BulkPriceUpdateRecord, MrpcUpdateBatchResponse,
};

use crate::domain::a001_product::api;
use crate::shared::api_utils::{ApiClient, ApiError};
use crate::shared::notify::{Notification, Notifier};

/// Куда уходит готовый пакет МРЦ
#[async_trait]
pub trait MrpcSink: Send + Sync {
    async fn submit(&self, records: &[BulkPriceUpdateRecord]) -> Result<MrpcUpdateBatchResponse, ApiError>;
}

#[async_trait]
impl MrpcSink for ApiClient {
    async fn submit(&self, records: &[BulkPriceUpdateRecord]) -> Result<MrpcUpdateBatchResponse, ApiError> {
        api::set_mrpc(self, records).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BulkUpdateResult {
    /// Nothing was sent; one message per bad line
    Rejected(Vec<String>),
    /// Nothing was sent; the buffer had no records
    NoData,
    Submitted(MrpcUpdateBatchResponse),
}

/// Executor для массового обновления МРЦ
pub struct BulkMrpcExecutor<S: MrpcSink> {
    sink: S,
    notifier: Arc<dyn Notifier>,
}

impl<S: MrpcSink> BulkMrpcExecutor<S> {
    pub fn new(sink: S, notifier: Arc<dyn Notifier>) -> Self {
        Self { sink, notifier }
    }

    /// Parse the pasted buffer and, if every line is valid, send it as a
    /// single batch. Backend failures come back as `Err` after the user has
    /// been notified.
    pub async fn execute(&self, text: &str) -> Result<BulkUpdateResult, ApiError> {
        let records = match parse_bulk_mrpc(text) {
            BulkParseOutcome::Ready(records) => records,
            outcome @ BulkParseOutcome::Rejected(_) => {
                let messages = outcome.error_messages();
                tracing::warn!("Bulk MRPC rejected: {} bad line(s)", messages.len());
                self.notifier
                    .notify(Notification::error("Validation errors", messages.join("\n")));
                return Ok(BulkUpdateResult::Rejected(messages));
            }
            BulkParseOutcome::NoData => {
                self.notifier
                    .notify(Notification::error("No data", "No data to update"));
                return Ok(BulkUpdateResult::NoData);
            }
        };

        tracing::info!("Submitting MRPC for {} SKU(s)", records.len());
        let response = match self.sink.submit(&records).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Bulk MRPC update failed: {}", e);
                self.notifier
                    .notify(Notification::error("Failed to update MRPC", e.to_string()));
                return Err(e);
            }
        };

        self.notifier.notify(Notification::success(
            "MRPC updated",
            format!("Updated {} products", response.updated.len()),
        ));
        if !response.errors.is_empty() {
            let details: Vec<String> = response
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.sku, e.error))
                .collect();
            self.notifier.notify(Notification::error(
                format!("{} SKU(s) not updated", response.errors.len()),
                details.join("\n"),
            ));
        }

        Ok(BulkUpdateResult::Submitted(response))
    }
}
