use crate::model::{BatchId, Credentials, NewUploadBatch, UploadBatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Record store errors
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Failed to connect to record store after {attempts} attempt(s): {source}")]
    Connect {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("Record store query failed ({operation}): {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl RecordError {
    pub(crate) fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| RecordError::Query { operation, source }
    }
}

/// Collection of upload batch documents
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a batch and return the id assigned to it
    async fn insert(&self, batch: &NewUploadBatch) -> Result<BatchId, RecordError>;

    /// Exact match on both credential fields.
    ///
    /// When several batches share the pair, the most recently inserted one
    /// is returned.
    async fn find_one_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<UploadBatch>, RecordError>;

    /// Every batch with `expires_at <= as_of`, in no particular order
    async fn find_expired(&self, as_of: DateTime<Utc>) -> Result<Vec<UploadBatch>, RecordError>;

    /// Remove a batch. Unknown ids are not an error.
    async fn delete_by_id(&self, id: BatchId) -> Result<(), RecordError>;

    /// Release the underlying connection handle
    async fn close(&self) {}
}
