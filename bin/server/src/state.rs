//! Server application state

use crate::constants::UPLOADS_MOUNT;
use actix_web::HttpRequest;
use std::sync::Arc;
use tempdrop_lifecycle::UploadManager;

/// Shared by every request handler
pub struct AppState {
    pub manager: Arc<UploadManager>,
    public_url: Option<String>,
}

impl AppState {
    pub fn new(manager: Arc<UploadManager>, public_url: Option<String>) -> Self {
        Self {
            manager,
            public_url,
        }
    }

    /// Configured public URL, or scheme and host of the incoming request
    pub fn base_url(&self, req: &HttpRequest) -> String {
        match &self.public_url {
            Some(url) => url.clone(),
            None => {
                let info = req.connection_info();
                format!("{}://{}", info.scheme(), info.host())
            }
        }
    }
}

/// External reference of a stored file under the static uploads mount
pub fn file_url(base_url: &str, stored_name: &str) -> String {
    format!(
        "{}{}/{}",
        base_url.trim_end_matches('/'),
        UPLOADS_MOUNT,
        urlencoding::encode(stored_name)
    )
}
