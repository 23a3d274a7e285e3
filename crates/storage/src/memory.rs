//! In-process record store

use crate::model::{BatchId, Credentials, NewUploadBatch, UploadBatch};
use crate::records::{RecordError, RecordStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Record store kept in memory, in insertion order.
///
/// Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryRecordStore {
    batches: RwLock<Vec<UploadBatch>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.batches.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.batches.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, batch: &NewUploadBatch) -> Result<BatchId, RecordError> {
        let id = BatchId::new();
        self.batches
            .write()
            .await
            .push(UploadBatch::from_new(id, batch.clone()));
        Ok(id)
    }

    async fn find_one_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<UploadBatch>, RecordError> {
        let batches = self.batches.read().await;
        Ok(batches
            .iter()
            .rev()
            .find(|batch| batch.credentials.matches(credentials))
            .cloned())
    }

    async fn find_expired(&self, as_of: DateTime<Utc>) -> Result<Vec<UploadBatch>, RecordError> {
        let batches = self.batches.read().await;
        Ok(batches
            .iter()
            .filter(|batch| batch.is_expired_at(as_of))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: BatchId) -> Result<(), RecordError> {
        self.batches.write().await.retain(|batch| batch.id != id);
        Ok(())
    }
}
