use crate::records::RecordError;
use sqlx::PgPool;
use tracing::info;

/// Database schema manager
pub struct Schema;

impl Schema {
    /// Create the batch table and its indexes if they do not exist
    pub async fn initialize(pool: &PgPool) -> Result<(), RecordError> {
        Self::create_upload_batches_table(pool).await?;
        Self::create_indexes(pool).await?;
        info!("Upload batch schema ready");
        Ok(())
    }

    /// `seq` records insertion order and breaks ties between batches that
    /// share a credential pair. `files` holds the ordered FileEntry array.
    async fn create_upload_batches_table(pool: &PgPool) -> Result<(), RecordError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS upload_batches (
                seq BIGSERIAL NOT NULL,
                id UUID PRIMARY KEY,
                auth_name TEXT NOT NULL,
                auth_secret TEXT NOT NULL,
                files JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                expires_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(RecordError::query("create upload_batches table"))?;
        Ok(())
    }

    async fn create_indexes(pool: &PgPool) -> Result<(), RecordError> {
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_upload_batches_auth ON upload_batches(auth_name, auth_secret, seq DESC)",
        )
        .execute(pool)
        .await
        .map_err(RecordError::query("create credentials index"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_upload_batches_expiry ON upload_batches(expires_at)",
        )
        .execute(pool)
        .await
        .map_err(RecordError::query("create expiry index"))?;
        Ok(())
    }
}
