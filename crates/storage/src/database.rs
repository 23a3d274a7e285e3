//! PostgreSQL record store

mod queries;
mod schema;

use crate::model::{BatchId, Credentials, NewUploadBatch, UploadBatch};
use crate::records::{RecordError, RecordStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use queries::Queries;
use schema::Schema;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_INITIAL_DELAY_SECONDS: u64 = 1;

/// Retry policy for the initial database connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseRetryConfig {
    pub max_attempts: u32,
    pub initial_delay_seconds: u64,
}

impl Default for DatabaseRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay_seconds: DEFAULT_INITIAL_DELAY_SECONDS,
        }
    }
}

impl DatabaseRetryConfig {
    /// Read `DB_MAX_RETRY_ATTEMPTS` and `DB_RETRY_INITIAL_DELAY_SECONDS`,
    /// falling back to defaults for missing or unparsable values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: lookup("DB_MAX_RETRY_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .filter(|n: &u32| *n > 0)
                .unwrap_or(defaults.max_attempts),
            initial_delay_seconds: lookup("DB_RETRY_INITIAL_DELAY_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.initial_delay_seconds),
        }
    }
}

/// Batch documents in a single PostgreSQL table
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Connect (retrying with exponential backoff) and ensure the schema exists
    pub async fn connect(
        database_url: &str,
        retry_config: DatabaseRetryConfig,
    ) -> Result<Self, RecordError> {
        let max_attempts = retry_config.max_attempts.max(1);
        let mut delay = Duration::from_secs(retry_config.initial_delay_seconds);
        let mut attempt = 1;

        let pool = loop {
            match PgPool::connect(database_url).await {
                Ok(pool) => break pool,
                Err(source) if attempt >= max_attempts => {
                    return Err(RecordError::Connect {
                        attempts: attempt,
                        source,
                    });
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts,
                        delay_seconds = delay.as_secs(),
                        error = %e,
                        "Database connection failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
            }
        };

        Schema::initialize(&pool).await?;
        info!("Connected to PostgreSQL record store");
        Ok(Self { pool })
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn insert(&self, batch: &NewUploadBatch) -> Result<BatchId, RecordError> {
        Queries::insert_batch(&self.pool, batch).await
    }

    async fn find_one_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<UploadBatch>, RecordError> {
        Queries::find_by_credentials(&self.pool, credentials).await
    }

    async fn find_expired(&self, as_of: DateTime<Utc>) -> Result<Vec<UploadBatch>, RecordError> {
        Queries::find_expired(&self.pool, as_of).await
    }

    async fn delete_by_id(&self, id: BatchId) -> Result<(), RecordError> {
        Queries::delete_batch(&self.pool, id).await
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}
