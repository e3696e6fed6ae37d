//! Route definitions for image blob uploads.
//!
//! Mounted at the `/api/v1` root by `api_routes()`.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Upload routes.
///
/// ```text
/// POST   /upload      -> upload_file (multipart)
/// DELETE /upload      -> delete_file (JSON body with url)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(uploads::upload_file).delete(uploads::delete_file),
        )
        // Image files outgrow axum's default 2 MB body cap.
        .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES))
}
