pub mod health;
pub mod me;
pub mod products;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                 list (GET)
/// /products/migrate         run legacy migration (POST, admin)
/// /products/{code}          get (GET), partial update (PATCH, editor+)
///
/// /upload                   store image (POST, editor+)
///                           delete image by URL (DELETE, editor+)
///
/// /me/role                  caller's resolved role (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Product catalog (also carries the nested migrate endpoint).
        .nest("/products", products::router())
        // Image blob uploads, mounted at the API root.
        .merge(uploads::router())
        // Caller identity.
        .nest("/me", me::router())
}
