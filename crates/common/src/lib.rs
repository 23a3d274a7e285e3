pub mod file_utils;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credential pair presented on every request (JSON or form encoded)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthDetails {
    pub name: String,
    pub password: String,
}

/// Response to a credential availability check
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CheckAuthResponse {
    pub available: bool, // false when a batch already uses this pair
}

/// Metadata of one stored file as returned after an upload
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    pub original_name: String,
    pub stored_name: String,
    pub size_bytes: u64,
    pub content_type: String,
}

/// Response to a successful upload
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UploadResponse {
    pub id: String,
    pub files: Vec<UploadedFile>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// One entry of a batch listing; `url` points at the static file mount
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ListedFile {
    pub original_name: String,
    pub url: String,
    pub size_bytes: u64,
    pub content_type: String,
}

/// Response to a batch listing
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ListResponse {
    pub files: Vec<ListedFile>,
}

/// Response to a batch deletion
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Error body returned by every failing endpoint
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,   // stable category, e.g. "not_found"
    pub message: String, // human readable
}

/// Response from health check endpoint
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String, // "ok" when healthy
}
