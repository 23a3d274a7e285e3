use crate::error::UploadError;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tempdrop_common::file_utils::validate_original_name;
use tempdrop_storage::{
    BatchId, BlobReader, BlobStore, Credentials, FileEntry, NewUploadBatch, RecordStore,
};
use tracing::{info, warn};

/// Result of a credential availability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Available,
    Taken,
}

/// One file of an upload request, not yet written
pub struct IncomingFile {
    pub original_name: String,
    pub content_type: String,
    pub reader: BlobReader,
}

impl IncomingFile {
    pub fn new(
        original_name: impl Into<String>,
        content_type: impl Into<String>,
        reader: BlobReader,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            content_type: content_type.into(),
            reader,
        }
    }
}

/// Outcome of a successful `create_batch`
#[derive(Debug, Clone)]
pub struct CreatedBatch {
    pub id: BatchId,
    pub files: Vec<FileEntry>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A stored file projected for a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub original_name: String,
    pub external_reference: String,
    pub size_bytes: u64,
    pub content_type: String,
}

/// Foreground operations on upload batches
pub struct UploadManager {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
}

impl UploadManager {
    pub fn new(records: Arc<dyn RecordStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { records, blobs }
    }

    /// `Available` when no batch is stored under exactly this pair
    pub async fn check_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<CredentialStatus, UploadError> {
        require_credentials(credentials)?;
        let existing = self.records.find_one_by_credentials(credentials).await?;
        Ok(match existing {
            Some(_) => CredentialStatus::Taken,
            None => CredentialStatus::Available,
        })
    }

    /// Write every file, then record the batch.
    ///
    /// The record is inserted only once all writes have resolved. If any
    /// write or the insert fails, the blobs written by this call are removed
    /// best-effort and the first failure is returned. Colliding credentials
    /// are not rejected here.
    pub async fn create_batch(
        &self,
        credentials: Credentials,
        files: Vec<IncomingFile>,
    ) -> Result<CreatedBatch, UploadError> {
        require_credentials(&credentials)?;
        if files.is_empty() {
            return Err(UploadError::InvalidInput(
                "At least one file is required.".to_string(),
            ));
        }
        for file in &files {
            validate_original_name(&file.original_name).map_err(|e| {
                UploadError::InvalidInput(format!("{}: {:?}", e.message(), file.original_name))
            })?;
        }

        let blobs = &self.blobs;
        let writes = files.into_iter().map(move |file| async move {
            let IncomingFile {
                original_name,
                content_type,
                reader,
            } = file;
            blobs.put(&original_name, &content_type, reader).await
        });

        // join_all keeps submission order
        let mut stored = Vec::new();
        let mut first_error = None;
        for result in join_all(writes).await {
            match result {
                Ok(entry) => stored.push(entry),
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(e) => warn!(error = %e, "Additional blob write failed"),
            }
        }
        if let Some(e) = first_error {
            self.discard(&stored).await;
            return Err(e.into());
        }

        let batch = NewUploadBatch::new(credentials, stored, Utc::now());
        let id = match self.records.insert(&batch).await {
            Ok(id) => id,
            Err(e) => {
                self.discard(&batch.files).await;
                return Err(e.into());
            }
        };

        info!(
            batch_id = %id,
            name = ?batch.credentials.name,
            files = batch.files.len(),
            expires_at = %batch.expires_at,
            "Upload batch created"
        );

        Ok(CreatedBatch {
            id,
            files: batch.files,
            created_at: batch.created_at,
            expires_at: batch.expires_at,
        })
    }

    /// Remove every blob of the matching batch, then its record.
    ///
    /// A blob that is already gone counts as removed. Any other blob fault
    /// is returned before the record is touched.
    pub async fn delete_batch(&self, credentials: &Credentials) -> Result<BatchId, UploadError> {
        require_credentials(credentials)?;
        let batch = self
            .records
            .find_one_by_credentials(credentials)
            .await?
            .ok_or(UploadError::NotFound)?;

        for file in &batch.files {
            self.blobs.delete(&file.storage_path).await?;
        }
        self.records.delete_by_id(batch.id).await?;

        info!(batch_id = %batch.id, files = batch.files.len(), "Upload batch deleted");
        Ok(batch.id)
    }

    /// Files of the matching batch with `resolve` applied to each stored name.
    ///
    /// Read-only: expiry is not extended by access.
    pub async fn list_batch<F>(
        &self,
        credentials: &Credentials,
        resolve: F,
    ) -> Result<Vec<ResolvedFile>, UploadError>
    where
        F: Fn(&str) -> String,
    {
        require_credentials(credentials)?;
        let batch = self
            .records
            .find_one_by_credentials(credentials)
            .await?
            .ok_or(UploadError::NotFound)?;

        Ok(batch
            .files
            .into_iter()
            .map(|file| ResolvedFile {
                external_reference: resolve(&file.stored_name),
                original_name: file.original_name,
                size_bytes: file.size_bytes,
                content_type: file.content_type,
            })
            .collect())
    }

    async fn discard(&self, files: &[FileEntry]) {
        for file in files {
            if let Err(e) = self.blobs.delete(&file.storage_path).await {
                warn!(
                    stored_name = ?file.stored_name,
                    error = %e,
                    "Failed to remove blob of aborted upload"
                );
            }
        }
    }
}

fn require_credentials(credentials: &Credentials) -> Result<(), UploadError> {
    if !credentials.is_complete() {
        return Err(UploadError::InvalidInput(
            "Name and password are required.".to_string(),
        ));
    }
    // PostgreSQL TEXT cannot hold NUL
    if credentials.name.contains('\0') || credentials.secret.contains('\0') {
        return Err(UploadError::InvalidInput(
            "Name and password must not contain null bytes.".to_string(),
        ));
    }
    Ok(())
}
