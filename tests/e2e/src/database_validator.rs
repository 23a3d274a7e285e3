use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// The batch row exists under the credentials with the expected files and a 24h expiry
pub async fn validate_upload(
    database_url: &str,
    batch_id: &str,
    name: &str,
    password: &str,
    expected_file_count: usize,
) -> Result<()> {
    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;
    let id = Uuid::parse_str(batch_id).context("Batch id is not a UUID")?;

    let row: Option<(String, String, i32, f64)> = sqlx::query_as(
        "SELECT auth_name, auth_secret, jsonb_array_length(files), \
         EXTRACT(EPOCH FROM (expires_at - created_at))::float8 \
         FROM upload_batches WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await
    .context("Failed to query batch")?;

    let (auth_name, auth_secret, file_count, lifetime_seconds) =
        row.with_context(|| format!("Batch {} not found in database", batch_id))?;

    if auth_name != name || auth_secret != password {
        anyhow::bail!("Batch {} stored under unexpected credentials", batch_id);
    }
    println!("  ✓ Batch {} exists under the test credentials", batch_id);

    if file_count as usize != expected_file_count {
        anyhow::bail!(
            "Expected {} files, found {} in database",
            expected_file_count,
            file_count
        );
    }
    println!(
        "  ✓ Found {} files in batch (expected {})",
        file_count, expected_file_count
    );

    if (lifetime_seconds - 24.0 * 3600.0).abs() > 1.0 {
        anyhow::bail!("Batch lifetime is {}s, expected 24h", lifetime_seconds);
    }
    println!("  ✓ Batch expires 24h after creation");

    pool.close().await;
    Ok(())
}

/// No row is left for the batch
pub async fn validate_deleted(database_url: &str, batch_id: &str) -> Result<()> {
    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;
    let id = Uuid::parse_str(batch_id).context("Batch id is not a UUID")?;

    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM upload_batches WHERE id = $1)",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .context("Failed to check if batch exists")?;

    if exists {
        anyhow::bail!("Batch {} still present after delete", batch_id);
    }
    println!("  ✓ Batch row removed");

    pool.close().await;
    Ok(())
}

/// Number of batch rows stored under exactly this pair
pub async fn count_batches(database_url: &str, name: &str, password: &str) -> Result<i64> {
    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM upload_batches WHERE auth_name = $1 AND auth_secret = $2",
    )
    .bind(name)
    .bind(password)
    .fetch_one(&pool)
    .await
    .context("Failed to count batches")?;

    pool.close().await;
    Ok(count)
}

/// Remove any rows left under the test credentials
pub async fn cleanup_test_data(database_url: &str, name: &str, password: &str) -> Result<()> {
    if crate::test_utils::keep_test_data() {
        println!("⚠️  Keeping database test data (KEEP_TEST_DATA=true)");
        return Ok(());
    }

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database for cleanup")?;

    println!("🧹 Cleaning up database test data...");
    let removed = sqlx::query("DELETE FROM upload_batches WHERE auth_name = $1 AND auth_secret = $2")
        .bind(name)
        .bind(password)
        .execute(&pool)
        .await
        .context("Failed to delete test batches from database")?
        .rows_affected();
    println!("✅ Removed {} leftover batches", removed);

    pool.close().await;
    Ok(())
}
