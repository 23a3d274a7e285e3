use tempdrop_storage::{BlobError, RecordError};
use thiserror::Error;

/// Failure of a lifecycle operation
#[derive(Debug, Error)]
pub enum UploadError {
    /// Missing or malformed request field, never retried
    #[error("{0}")]
    InvalidInput(String),

    /// No batch matches the presented credentials
    #[error("No upload found for the provided name and password")]
    NotFound,

    #[error("Blob storage failure: {0}")]
    StorageFailure(#[from] BlobError),

    #[error("Record store failure: {0}")]
    PersistenceFailure(#[from] RecordError),
}

impl UploadError {
    /// Stable machine-readable label
    pub fn category(&self) -> &'static str {
        match self {
            UploadError::InvalidInput(_) => "invalid_input",
            UploadError::NotFound => "not_found",
            UploadError::StorageFailure(_) => "storage_failure",
            UploadError::PersistenceFailure(_) => "persistence_failure",
        }
    }

    /// Faults of the service itself rather than of the request
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            UploadError::StorageFailure(_) | UploadError::PersistenceFailure(_)
        )
    }
}
