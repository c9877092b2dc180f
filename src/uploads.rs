/**
 * Upload Storage
 *
 * Blob-storage collaborator with the contract `store(file) -> URL`.
 * Uploaded images (club covers, profile and cover photos) are written to
 * the configured upload directory as `<timestamp>_<filename>` and the
 * returned URL is served statically under `/uploads`.
 */

use std::path::Path;

use chrono::Utc;

use crate::error::ApiError;

/// Strip any path components from a client-supplied filename.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();
    if base.is_empty() {
        "upload".to_string()
    } else {
        base.to_string()
    }
}

/// Store an uploaded file and return its public URL.
pub fn store_upload(dir: &Path, filename: &str, bytes: &[u8]) -> Result<String, ApiError> {
    let name = format!("{}_{}", Utc::now().timestamp(), sanitize_filename(filename));
    let path = dir.join(&name);

    std::fs::create_dir_all(dir).map_err(|e| {
        tracing::error!("Failed to create upload directory: {:?}", e);
        ApiError::internal("Failed to save image")
    })?;

    std::fs::write(&path, bytes).map_err(|e| {
        tracing::error!("Failed to write upload {:?}: {:?}", path, e);
        ApiError::internal("Failed to save image")
    })?;

    Ok(format!("/uploads/{}", name))
}
