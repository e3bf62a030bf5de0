//! Uploaded file storage
//!
//! Multipart uploads land on local disk under the configured upload
//! directory. File names are sanitized and timestamped so concurrent
//! uploads of the same name never collide.

use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::ApiError;

/// Subdirectory for claim supporting documents
pub const CLAIM_DOCUMENTS: &str = "claim_documents";
/// Subdirectory for profile photos
pub const PROFILE_PHOTOS: &str = "profile_photos";

/// Strips path components and replaces anything outside a safe
/// character set
fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Stores an uploaded file and returns its path relative to the upload
/// root
pub async fn store(
    upload_dir: &str,
    subdir: &str,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("uploaded file is empty".to_string()));
    }

    let stamped = format!(
        "{}_{}",
        Utc::now().format("%Y%m%d%H%M%S%f"),
        sanitize_file_name(original_name)
    );
    let relative = format!("{subdir}/{stamped}");

    let dir: PathBuf = [upload_dir, subdir].iter().collect();
    fs::create_dir_all(&dir)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to create upload dir: {e}")))?;
    fs::write(dir.join(&stamped), bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to store upload: {e}")))?;

    Ok(relative)
}
