/// Default blob directory
pub const DEFAULT_UPLOAD_DIR: &str = "uploaded_files";

/// Default server host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_PORT: &str = "8080";

/// Default seconds between expiry sweeps
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: &str = "3600";

/// Default cap on one multipart upload (1 GiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: &str = "1073741824";

/// Record store identifier for PostgreSQL (also the default)
pub const STORE_TYPE_DATABASE: &str = "db";

/// Record store identifier for the in-process store
pub const STORE_TYPE_MEMORY: &str = "memory";

/// URL prefix under which the static file layer exposes the blob directory
pub const UPLOADS_MOUNT: &str = "/uploads";
