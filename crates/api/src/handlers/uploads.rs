//! Handlers for image blob uploads and deletions.
//!
//! Uploads land in the blob store under `products/{folder}/...` with a
//! random suffix so re-uploading the same filename never overwrites an
//! object another product still references. The returned URL is what
//! clients later write into a product's `images` via PATCH.

use axum::extract::{Multipart, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireImageEditor;
use crate::state::AppState;

/// Maximum accepted upload size in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Query parameters for uploads (`?folder=`).
#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// Sub-folder under `products/`; defaults to `misc`.
    pub folder: Option<String>,
}

/// Response for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public URL of the stored object.
    pub url: String,
    /// Object key within the store.
    pub pathname: String,
}

/// Request body for `DELETE /upload`.
#[derive(Debug, Deserialize)]
pub struct DeleteUploadRequest {
    pub url: Option<String>,
}

/// Response for a deleted upload.
#[derive(Debug, Serialize)]
pub struct DeleteUploadResponse {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// POST /upload
// ---------------------------------------------------------------------------

/// Store a multipart `file` field in the blob store.
pub async fn upload_file(
    RequireImageEditor(editor): RequireImageEditor,
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.bin").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file = Some((filename, content_type, bytes.to_vec()));
        }
        // ignore unknown fields
    }

    let (filename, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("No file provided".into()))?;

    let folder = params
        .folder
        .as_deref()
        .filter(|f| !f.is_empty())
        .unwrap_or("misc");
    let key = object_key(folder, &filename);

    let url = state.blob.put(&key, bytes, &content_type).await?;

    tracing::info!(user_id = editor.user_id, key = %key, "image uploaded");

    Ok(Json(UploadResponse { url, pathname: key }))
}

// ---------------------------------------------------------------------------
// DELETE /upload
// ---------------------------------------------------------------------------

/// Delete a stored object by its public URL.
///
/// This is the direct deletion endpoint; unlike the best-effort sweeps in
/// the PATCH flow, a backend failure here is reported to the caller.
pub async fn delete_file(
    RequireImageEditor(editor): RequireImageEditor,
    State(state): State<AppState>,
    Json(request): Json<DeleteUploadRequest>,
) -> AppResult<Json<DeleteUploadResponse>> {
    let url = request
        .url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("No URL provided".into()))?;

    state.blob.delete(url).await?;

    tracing::info!(user_id = editor.user_id, url, "image deleted");

    Ok(Json(DeleteUploadResponse { success: true }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the object key for an upload: `products/{folder}/{stem}-{suffix}[.ext]`.
fn object_key(folder: &str, filename: &str) -> String {
    let folder = sanitize_segment(folder);
    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    };
    let stem = sanitize_segment(stem);

    let uuid = Uuid::new_v4().simple().to_string();
    let suffix = &uuid[..8];

    match ext {
        Some(ext) => format!("products/{folder}/{stem}-{suffix}.{}", ext.to_lowercase()),
        None => format!("products/{folder}/{stem}-{suffix}"),
    }
}

/// Reduce a client-supplied path segment to `[A-Za-z0-9_-]`, collapsing
/// anything else (separators included) to `-`.
fn sanitize_segment(segment: &str) -> String {
    let cleaned: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('-');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}
