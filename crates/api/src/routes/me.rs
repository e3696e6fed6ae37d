//! Route definitions for the caller's own account.
//!
//! Mounted at `/me` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Self-service routes.
///
/// ```text
/// GET /role  -> get_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/role", get(me::get_role))
}
