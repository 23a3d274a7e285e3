use crate::model::FileEntry;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Byte source for a single upload
pub type BlobReader = Pin<Box<dyn AsyncRead + Send>>;

/// Blob store errors
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Failed to prepare upload directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write blob {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete blob {}: {source}", .path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path {} does not name a blob", .0.display())]
    NotABlobPath(PathBuf),
}

/// Storage for uploaded file bytes
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write all bytes from `reader` under a freshly generated stored name.
    ///
    /// On failure no partial file is left behind.
    async fn put(
        &self,
        original_name: &str,
        content_type: &str,
        reader: BlobReader,
    ) -> Result<FileEntry, BlobError>;

    /// Remove the blob stored at `path`. A missing file is not an error.
    async fn delete(&self, path: &Path) -> Result<(), BlobError>;
}
