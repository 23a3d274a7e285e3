use crate::constants::{
    DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT, DEFAULT_SWEEP_INTERVAL_SECONDS,
    DEFAULT_UPLOAD_DIR, STORE_TYPE_DATABASE, STORE_TYPE_MEMORY,
};
use clap::{Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use tempdrop_storage::{DatabaseRetryConfig, RecordBackend};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Record store backend type
    pub store_type: StoreType,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory holding uploaded blobs
    pub upload_dir: PathBuf,
    /// Database URL, present for the database store
    pub database_url: Option<String>,
    /// Database retry configuration
    pub database_retry_config: DatabaseRetryConfig,
    /// Base for external file references; derived per request when unset
    pub public_url: Option<String>,
    /// Time between expiry sweeps
    pub sweep_interval: Duration,
    /// Largest accepted multipart upload, all files of a batch together
    pub max_upload_bytes: usize,
}

/// Record store backend type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreType {
    Database,
    Memory,
}

fn command() -> Command {
    Command::new("tempdrop-server")
        .arg(
            Arg::new("store")
                .long("store")
                .value_name("TYPE")
                .help("Record store: 'db' for PostgreSQL or 'memory' (or RECORD_STORE env var)"),
        )
        .arg(
            Arg::new("database-url")
                .long("database-url")
                .value_name("URL")
                .help("Database URL for the PostgreSQL store (can also use DATABASE_URL env var)"),
        )
        .arg(
            Arg::new("upload-dir")
                .long("upload-dir")
                .value_name("DIR")
                .help("Directory for uploaded files (default: uploaded_files, or UPLOAD_DIR env var)"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .help("Server port (default: 8080, or SERVER_PORT env var)"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Server host (default: 0.0.0.0, or SERVER_HOST env var)"),
        )
        .arg(
            Arg::new("public-url")
                .long("public-url")
                .value_name("URL")
                .help("Public base URL for file links (default: request host, or PUBLIC_URL env var)"),
        )
        .arg(
            Arg::new("sweep-interval")
                .long("sweep-interval")
                .value_name("SECONDS")
                .help("Seconds between expiry sweeps (default: 3600, or SWEEP_INTERVAL_SECONDS env var)"),
        )
        .arg(
            Arg::new("max-upload-bytes")
                .long("max-upload-bytes")
                .value_name("BYTES")
                .help("Largest accepted upload in bytes (default: 1 GiB, or MAX_UPLOAD_BYTES env var)"),
        )
}

fn invalid_input(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, message)
}

impl ServerConfig {
    /// Load from process arguments and environment.
    /// Priority: command-line args > environment variables > defaults
    pub fn load() -> Result<Self, std::io::Error> {
        Self::parse(std::env::args_os(), |key| std::env::var(key).ok())
    }

    fn parse<I, T>(args: I, env: impl Fn(&str) -> Option<String>) -> Result<Self, std::io::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command()
            .try_get_matches_from(args)
            .map_err(|e| invalid_input(e.to_string()))?;

        let setting = |arg: &str, var: &str| -> Option<String> {
            arg_value(&matches, arg).or_else(|| env(var))
        };

        let store_str =
            setting("store", "RECORD_STORE").unwrap_or_else(|| STORE_TYPE_DATABASE.to_string());
        let store_type = match store_str.as_str() {
            STORE_TYPE_DATABASE => StoreType::Database,
            STORE_TYPE_MEMORY => StoreType::Memory,
            _ => {
                return Err(invalid_input(format!(
                    "Invalid record store: {}. Must be '{}' or '{}'",
                    store_str, STORE_TYPE_DATABASE, STORE_TYPE_MEMORY
                )));
            }
        };

        let database_url = match store_type {
            StoreType::Database => Some(setting("database-url", "DATABASE_URL").ok_or_else(|| {
                invalid_input(
                    "Database URL required when using the database store. Set --database-url or DATABASE_URL env var"
                        .to_string(),
                )
            })?),
            StoreType::Memory => None,
        };

        let upload_dir = PathBuf::from(
            setting("upload-dir", "UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
        );

        let host = setting("host", "SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port_str = setting("port", "SERVER_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port_str
            .parse()
            .map_err(|_| invalid_input(format!("Invalid port number: {}", port_str)))?;

        let interval_str = setting("sweep-interval", "SWEEP_INTERVAL_SECONDS")
            .unwrap_or_else(|| DEFAULT_SWEEP_INTERVAL_SECONDS.to_string());
        let sweep_seconds: u64 = interval_str
            .parse()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| invalid_input(format!("Invalid sweep interval: {}", interval_str)))?;

        let limit_str = setting("max-upload-bytes", "MAX_UPLOAD_BYTES")
            .unwrap_or_else(|| DEFAULT_MAX_UPLOAD_BYTES.to_string());
        let max_upload_bytes: usize = limit_str
            .parse()
            .ok()
            .filter(|bytes| *bytes > 0)
            .ok_or_else(|| invalid_input(format!("Invalid upload limit: {}", limit_str)))?;

        let public_url = setting("public-url", "PUBLIC_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(ServerConfig {
            store_type,
            host,
            port,
            upload_dir,
            database_url,
            database_retry_config: DatabaseRetryConfig::from_env(),
            public_url,
            sweep_interval: Duration::from_secs(sweep_seconds),
            max_upload_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Record backend selected by this configuration
    pub fn record_backend(&self) -> RecordBackend {
        match (&self.store_type, &self.database_url) {
            (StoreType::Database, Some(database_url)) => RecordBackend::Database {
                database_url: database_url.clone(),
                retry_config: Some(self.database_retry_config.clone()),
            },
            _ => RecordBackend::Memory,
        }
    }
}

fn arg_value(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}
