//! Handler for the legacy `product_codes` -> `products` migration.
//!
//! The migration scans the legacy table in pages, derives a product from
//! each usable row, and bulk-inserts in batches with `ON CONFLICT (code)
//! DO NOTHING`. Codes that already exist are skipped, so the endpoint is
//! idempotent and safe to re-run after a partial failure.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use partsdesk_core::migration::{NewProduct, CODE_PAGE_SIZE, INSERT_BATCH_SIZE};
use partsdesk_db::repositories::{ProductCodeRepo, ProductRepo};
use serde::Serialize;

use crate::middleware::rbac::RequireProductEditor;
use crate::state::AppState;

/// Summary returned after a completed migration run.
#[derive(Debug, Serialize)]
pub struct MigrationReport {
    pub message: &'static str,
    /// Legacy rows scanned, including those dropped for having no code.
    #[serde(rename = "totalCodes")]
    pub total_codes: i64,
    /// Rows actually inserted; re-runs over migrated data report 0.
    pub inserted: u64,
}

// ---------------------------------------------------------------------------
// POST /products/migrate
// ---------------------------------------------------------------------------

/// Run the legacy migration.
///
/// On a mid-run failure the response still reports how many rows made it
/// in (`insertedSoFar`); those rows stay, and a re-run picks up where the
/// conflict skipping leaves off.
pub async fn migrate(
    RequireProductEditor(admin): RequireProductEditor,
    State(state): State<AppState>,
) -> Response {
    let mut offset = 0i64;
    let mut total_codes = 0i64;
    let mut inserted = 0u64;

    loop {
        let codes = match ProductCodeRepo::fetch_page(&state.pool, CODE_PAGE_SIZE, offset).await {
            Ok(codes) => codes,
            Err(error) => return partial_failure(&error, inserted),
        };
        if codes.is_empty() {
            break;
        }
        total_codes += codes.len() as i64;

        let derived: Vec<NewProduct> = codes.iter().filter_map(|code| code.derive()).collect();
        for batch in derived.chunks(INSERT_BATCH_SIZE) {
            match ProductRepo::insert_missing(&state.pool, batch).await {
                Ok(rows) => inserted += rows,
                Err(error) => return partial_failure(&error, inserted),
            }
        }

        if (codes.len() as i64) < CODE_PAGE_SIZE {
            break;
        }
        offset += CODE_PAGE_SIZE;
    }

    let message = if total_codes == 0 {
        "No product codes found"
    } else {
        "Migration complete"
    };

    tracing::info!(
        user_id = admin.user_id,
        total_codes,
        inserted,
        "legacy product migration finished",
    );

    Json(MigrationReport {
        message,
        total_codes,
        inserted,
    })
    .into_response()
}

/// Build the 500 response for a migration that died mid-run.
fn partial_failure(error: &sqlx::Error, inserted: u64) -> Response {
    tracing::error!(%error, inserted, "legacy product migration aborted mid-run");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": "Migration failed",
            "code": "MIGRATION_FAILED",
            "insertedSoFar": inserted,
        })),
    )
        .into_response()
}
