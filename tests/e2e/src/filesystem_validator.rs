use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tempdrop_common::UploadResponse;

/// Every uploaded file is on disk under its stored name with the reported size
pub fn validate_upload(upload_dir: &Path, created: &UploadResponse) -> Result<()> {
    for file in &created.files {
        let path = upload_dir.join(&file.stored_name);
        let metadata =
            fs::metadata(&path).with_context(|| format!("Blob does not exist: {:?}", path))?;

        if metadata.len() != file.size_bytes {
            anyhow::bail!(
                "Blob {:?} has {} bytes, response reported {}",
                path,
                metadata.len(),
                file.size_bytes
            );
        }

        if !file.stored_name.ends_with(&format!("_{}", file.original_name)) {
            anyhow::bail!(
                "Stored name {} does not keep original name {}",
                file.stored_name,
                file.original_name
            );
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read blob: {:?}", path))?;
        if !content.contains("Test file") {
            anyhow::bail!("Blob content does not match expected pattern: {:?}", path);
        }
    }

    println!("  ✓ All {} blobs exist with matching sizes", created.files.len());
    Ok(())
}

/// None of the batch's blobs remain after deletion
pub fn validate_deleted(upload_dir: &Path, created: &UploadResponse) -> Result<()> {
    for file in &created.files {
        let path = upload_dir.join(&file.stored_name);
        if path.exists() {
            anyhow::bail!("Blob still exists after delete: {:?}", path);
        }
    }

    println!("  ✓ All blobs removed");
    Ok(())
}
