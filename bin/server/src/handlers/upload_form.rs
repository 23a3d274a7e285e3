use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};

/// Content type recorded when the client declares none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Multipart form for a batch upload
#[derive(MultipartForm)]
pub struct UploadForm {
    /// Lookup name for the batch
    pub name: Text<String>,

    /// Lookup secret for the batch, stored as given
    pub password: Text<String>,

    /// Files of the batch, in submission order
    pub files: Vec<TempFile>,
}

/// Declared name and MIME type of a spooled upload
pub fn describe(file: &TempFile) -> (String, String) {
    let original_name = file.file_name.clone().unwrap_or_default();
    let content_type = file
        .content_type
        .as_ref()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
    (original_name, content_type)
}
