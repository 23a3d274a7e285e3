//! Upload batch data model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Every batch expires this many hours after creation
pub const RETENTION_HOURS: i64 = 24;

/// Fixed retention window applied to every batch
pub fn retention() -> Duration {
    Duration::hours(RETENTION_HOURS)
}

/// Opaque batch identifier assigned by the record store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name/secret pair used as an exact-match lookup key.
///
/// The secret is stored and compared in plaintext. This is a weak
/// discretionary key, not authentication; a hardened deployment would hash it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
        }
    }

    /// Both fields are non-empty
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.secret.is_empty()
    }

    pub fn matches(&self, other: &Credentials) -> bool {
        self.name == other.name && self.secret == other.secret
    }
}

// Keeps the secret out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// One stored file of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Name supplied by the uploader, kept as-is
    pub original_name: String,
    /// `<random token>_<original name>`, unique per write
    pub stored_name: String,
    /// Location of the bytes, derived from `stored_name`
    pub storage_path: PathBuf,
    /// Size observed on disk after the write completed
    pub size_bytes: u64,
    /// MIME type declared by the uploader, unvalidated
    pub content_type: String,
}

/// A batch that has not been assigned an id yet
#[derive(Debug, Clone)]
pub struct NewUploadBatch {
    pub credentials: Credentials,
    pub files: Vec<FileEntry>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewUploadBatch {
    /// Build a batch created at `created_at`, expiring one retention window later
    pub fn new(credentials: Credentials, files: Vec<FileEntry>, created_at: DateTime<Utc>) -> Self {
        Self {
            credentials,
            files,
            created_at,
            expires_at: created_at + retention(),
        }
    }
}

/// A persisted batch. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    pub id: BatchId,
    pub credentials: Credentials,
    pub files: Vec<FileEntry>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl UploadBatch {
    pub fn from_new(id: BatchId, batch: NewUploadBatch) -> Self {
        Self {
            id,
            credentials: batch.credentials,
            files: batch.files,
            created_at: batch.created_at,
            expires_at: batch.expires_at,
        }
    }

    pub fn is_expired_at(&self, as_of: DateTime<Utc>) -> bool {
        self.expires_at <= as_of
    }
}
