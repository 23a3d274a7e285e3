use crate::api::LocalFile;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read all regular files of a directory, sorted by filename
pub fn read_files_from_directory(dir: &Path) -> Result<Vec<LocalFile>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .with_context(|| format!("File name is not valid UTF-8: {:?}", path))?;
        let content =
            fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path))?;

        files.push(LocalFile {
            content_type: guess_content_type(&filename).to_string(),
            filename,
            content,
        });
    }

    if files.is_empty() {
        anyhow::bail!("No files found in directory: {:?}", dir);
    }

    // Deterministic upload order
    files.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(files)
}

/// MIME type from the file extension; the server stores it unvalidated
pub fn guess_content_type(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("txt") | Some("md") => "text/plain",
        Some("html") | Some("htm") => "text/html",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
