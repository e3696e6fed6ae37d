//! Route definitions for the product catalog.
//!
//! Mounted at `/products` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{migration, products};
use crate::state::AppState;

/// Product routes.
///
/// ```text
/// GET    /            -> list
/// POST   /migrate     -> migrate (legacy import)
/// GET    /{code}      -> get_by_code
/// PATCH  /{code}      -> update_by_code
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list))
        .route("/migrate", post(migration::migrate))
        .route(
            "/{code}",
            get(products::get_by_code).patch(products::update_by_code),
        )
}
