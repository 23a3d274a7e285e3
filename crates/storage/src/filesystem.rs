//! Local filesystem blob store

use crate::blob::{BlobError, BlobReader, BlobStore};
use crate::model::FileEntry;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Flat directory of `<token>_<original name>` files
pub struct FilesystemBlobStore {
    upload_dir: PathBuf,
}

impl FilesystemBlobStore {
    /// Open the store, creating `upload_dir` if it does not exist yet
    pub async fn new(upload_dir: impl Into<PathBuf>) -> Result<Self, BlobError> {
        let upload_dir = upload_dir.into();
        fs::create_dir_all(&upload_dir)
            .await
            .map_err(|source| BlobError::Directory {
                path: upload_dir.clone(),
                source,
            })?;
        Ok(Self { upload_dir })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn stored_name(original_name: &str) -> String {
        format!("{}_{}", Uuid::new_v4().simple(), original_name)
    }

    fn path_for(&self, stored_name: &str) -> PathBuf {
        self.upload_dir.join(stored_name)
    }

    async fn fill(file: &mut fs::File, mut reader: BlobReader) -> std::io::Result<u64> {
        tokio::io::copy(&mut reader, file).await?;
        file.flush().await?;
        file.sync_all().await?;
        Ok(file.metadata().await?.len())
    }

    /// Best-effort removal of a blob whose write failed
    async fn discard(path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "Failed to remove partial blob");
            }
        }
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put(
        &self,
        original_name: &str,
        content_type: &str,
        reader: BlobReader,
    ) -> Result<FileEntry, BlobError> {
        let stored_name = Self::stored_name(original_name);
        let path = self.path_for(&stored_name);

        // create_new: never truncate a blob some other batch owns
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|source| BlobError::Write {
                path: path.clone(),
                source,
            })?;

        let size_bytes = match Self::fill(&mut file, reader).await {
            Ok(size) => size,
            Err(source) => {
                drop(file);
                Self::discard(&path).await;
                return Err(BlobError::Write { path, source });
            }
        };

        info!(
            stored_name = ?stored_name,
            size_bytes,
            "Blob written"
        );

        Ok(FileEntry {
            original_name: original_name.to_string(),
            stored_name,
            storage_path: path,
            size_bytes,
            content_type: content_type.to_string(),
        })
    }

    /// Only the file name of `path` is used. The blob is looked up in this
    /// store's directory whatever directory spelling the record carries.
    async fn delete(&self, path: &Path) -> Result<(), BlobError> {
        let target = match path.file_name() {
            Some(stored_name) => self.upload_dir.join(stored_name),
            None => return Err(BlobError::NotABlobPath(path.to_path_buf())),
        };

        match fs::remove_file(&target).await {
            Ok(()) => {
                debug!(path = %target.display(), "Blob deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %target.display(), "Blob already gone");
                Ok(())
            }
            Err(source) => Err(BlobError::Delete {
                path: target,
                source,
            }),
        }
    }
}
