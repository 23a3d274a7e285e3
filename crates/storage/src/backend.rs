use crate::database::{DatabaseRetryConfig, PostgresRecordStore};
use crate::memory::MemoryRecordStore;
use crate::records::{RecordError, RecordStore};
use std::sync::Arc;

/// Record store backend type
pub enum RecordBackend {
    /// PostgreSQL reachable at `database_url`
    Database {
        database_url: String,
        retry_config: Option<DatabaseRetryConfig>,
    },
    /// Process-local store, nothing survives a restart
    Memory,
}

impl RecordBackend {
    /// Initialize the record store based on type
    pub async fn initialize(self) -> Result<Arc<dyn RecordStore>, RecordError> {
        match self {
            RecordBackend::Database {
                database_url,
                retry_config,
            } => {
                let store =
                    PostgresRecordStore::connect(&database_url, retry_config.unwrap_or_default())
                        .await?;
                Ok(Arc::new(store))
            }
            RecordBackend::Memory => Ok(Arc::new(MemoryRecordStore::new())),
        }
    }
}
