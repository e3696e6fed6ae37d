//! Handlers for the `/products` resource.
//!
//! Reads are open to any assigned role. The PATCH endpoint is the single
//! write gateway for catalog fields: the caller's role decides whether the
//! whole patch is applied or only its `images` part, and every supplied
//! field is re-validated server-side regardless of what the client checked.

use axum::extract::{Path, Query, State};
use axum::Json;
use partsdesk_blob::slots;
use partsdesk_core::error::CoreError;
use partsdesk_core::pagination;
use partsdesk_core::product::ProductPatch;
use partsdesk_core::roles::can_edit_products;
use partsdesk_db::models::{Product, ProductListQuery};
use partsdesk_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireImageEditor, RequireStaff};
use crate::query::ProductListParams;
use crate::response::Paginated;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /products
// ---------------------------------------------------------------------------

/// List products with pagination, free-text search, and a status filter.
pub async fn list(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<Paginated<Product>>> {
    let page = pagination::clamp_page(params.page);
    let page_size = pagination::clamp_page_size(params.page_size);

    let query = ProductListQuery {
        search: params.search,
        status: params.status,
        limit: page_size,
        offset: pagination::offset(page, page_size),
    };

    let data = ProductRepo::search(&state.pool, &query).await?;
    let count = ProductRepo::count(&state.pool, &query).await?;

    Ok(Json(Paginated {
        data,
        count,
        page,
        page_size,
    }))
}

// ---------------------------------------------------------------------------
// GET /products/{code}
// ---------------------------------------------------------------------------

/// Fetch a single product by its business code.
pub async fn get_by_code(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::product_not_found(&code)))?;
    Ok(Json(product))
}

// ---------------------------------------------------------------------------
// PATCH /products/{code}
// ---------------------------------------------------------------------------

/// Apply a partial update to a product.
///
/// Unknown JSON keys were already dropped during deserialization, so a
/// payload of only unknown keys degrades to the empty patch, which is a
/// no-op: the current row is returned and nothing is written.
///
/// Role split: `admin` and up may touch any patchable field; `editor` may
/// only supply `images` and gets 403 the moment anything else appears in
/// the payload. After a persisted images change, blobs the update dropped
/// are deleted best-effort.
pub async fn update_by_code(
    RequireImageEditor(editor): RequireImageEditor,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> AppResult<Json<Product>> {
    let current = ProductRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::product_not_found(&code)))?;

    if patch.is_empty() {
        return Ok(Json(current));
    }

    let updated = if can_edit_products(editor.role) {
        patch.validate().map_err(CoreError::Validation)?;
        ProductRepo::update_by_code(&state.pool, &code, &patch).await?
    } else {
        let blocked = patch.fields_beyond_images();
        if !blocked.is_empty() {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "Editors may only update product images (rejected: {})",
                blocked.join(", ")
            ))));
        }
        match &patch.images {
            Some(images) => {
                images.validate().map_err(CoreError::Validation)?;
                ProductRepo::update_images(&state.pool, &code, images).await?
            }
            // Unreachable given the is_empty check, kept for totality.
            None => Some(current.clone()),
        }
    };

    let product =
        updated.ok_or_else(|| AppError::Core(CoreError::product_not_found(&code)))?;

    // The row now owns the new image set; reclaim whatever it dropped.
    if patch.images.is_some() {
        slots::sweep_removed(state.blob.as_ref(), &current.images.0, &product.images.0).await;
    }

    tracing::info!(
        %code,
        user_id = editor.user_id,
        role = %editor.role,
        fields = ?patch.supplied_fields(),
        "product updated",
    );

    Ok(Json(product))
}
