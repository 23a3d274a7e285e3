use crate::model::{BatchId, Credentials, FileEntry, NewUploadBatch, UploadBatch};
use crate::records::RecordError;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Column layout shared by every batch SELECT
type BatchRow = (
    Uuid,
    String,
    String,
    Json<Vec<FileEntry>>,
    DateTime<Utc>,
    DateTime<Utc>,
);

const SELECT_BATCH: &str =
    "SELECT id, auth_name, auth_secret, files, created_at, expires_at FROM upload_batches";

fn into_batch((id, name, secret, files, created_at, expires_at): BatchRow) -> UploadBatch {
    UploadBatch {
        id: BatchId::from_uuid(id),
        credentials: Credentials { name, secret },
        files: files.0,
        created_at,
        expires_at,
    }
}

/// Query operations for the batch table
pub struct Queries;

impl Queries {
    /// Insert a batch under a fresh id
    pub async fn insert_batch(
        pool: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
        batch: &NewUploadBatch,
    ) -> Result<BatchId, RecordError> {
        let id = BatchId::new();
        sqlx::query(
            "INSERT INTO upload_batches (id, auth_name, auth_secret, files, created_at, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id.as_uuid())
        .bind(&batch.credentials.name)
        .bind(&batch.credentials.secret)
        .bind(Json(&batch.files))
        .bind(batch.created_at)
        .bind(batch.expires_at)
        .execute(pool)
        .await
        .map_err(RecordError::query("insert batch"))?;
        Ok(id)
    }

    /// Newest batch stored under exactly this pair
    pub async fn find_by_credentials(
        pool: &PgPool,
        credentials: &Credentials,
    ) -> Result<Option<UploadBatch>, RecordError> {
        let row = sqlx::query_as::<_, BatchRow>(&format!(
            "{SELECT_BATCH} WHERE auth_name = $1 AND auth_secret = $2 ORDER BY seq DESC LIMIT 1"
        ))
        .bind(&credentials.name)
        .bind(&credentials.secret)
        .fetch_optional(pool)
        .await
        .map_err(RecordError::query("find batch by credentials"))?;

        Ok(row.map(into_batch))
    }

    /// Batches whose expiry is at or before `as_of`
    pub async fn find_expired(
        pool: &PgPool,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<UploadBatch>, RecordError> {
        let rows = sqlx::query_as::<_, BatchRow>(&format!("{SELECT_BATCH} WHERE expires_at <= $1"))
            .bind(as_of)
            .fetch_all(pool)
            .await
            .map_err(RecordError::query("find expired batches"))?;

        Ok(rows.into_iter().map(into_batch).collect())
    }

    /// Delete one batch; zero affected rows is fine
    pub async fn delete_batch(pool: &PgPool, id: BatchId) -> Result<(), RecordError> {
        sqlx::query("DELETE FROM upload_batches WHERE id = $1")
            .bind(id.as_uuid())
            .execute(pool)
            .await
            .map_err(RecordError::query("delete batch"))?;
        Ok(())
    }
}
