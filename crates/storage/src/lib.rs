//! Blob and record persistence for upload batches.
//!
//! Two independent stores back every batch: a [`BlobStore`] holding the file
//! bytes and a [`RecordStore`] holding the batch document that references
//! them. Neither store knows about the other; keeping them consistent is the
//! job of the lifecycle layer.

pub mod backend;
pub mod blob;
pub mod database;
pub mod filesystem;
pub mod memory;
pub mod model;
pub mod records;

pub use backend::RecordBackend;
pub use blob::{BlobError, BlobReader, BlobStore};
pub use database::{DatabaseRetryConfig, PostgresRecordStore};
pub use filesystem::FilesystemBlobStore;
pub use memory::MemoryRecordStore;
pub use model::{BatchId, Credentials, FileEntry, NewUploadBatch, UploadBatch, RETENTION_HOURS};
pub use records::{RecordError, RecordStore};
