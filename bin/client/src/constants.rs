/// Default server URL
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Credential availability endpoint path
pub const CHECK_ENDPOINT: &str = "/checkauth";

/// Upload endpoint path
pub const UPLOAD_ENDPOINT: &str = "/upload";

/// Listing endpoint path
pub const LIST_ENDPOINT: &str = "/get-uploads";

/// Deletion endpoint path
pub const DELETE_ENDPOINT: &str = "/delete";
