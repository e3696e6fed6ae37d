//! Role-based access control (RBAC) extractors.
//!
//! Each extractor authenticates the caller via [`AuthUser`], resolves their
//! role assignment from the database, and rejects requests that do not meet
//! the minimum requirement. Resolving per request means revoking or
//! downgrading a role takes effect on the next call, with no token to chase.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use partsdesk_core::error::CoreError;
use partsdesk_core::roles::{can_edit_images, can_edit_products, UserRole};
use partsdesk_db::repositories::RoleRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate and resolve the caller's role assignment.
///
/// A valid token without a role assignment is rejected with 401: such
/// accounts exist (they were provisioned but never assigned), and they have
/// no business in the catalog at all.
async fn resolve_assignment(parts: &mut Parts, state: &AppState) -> Result<UserRole, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    RoleRepo::resolve_for_user(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("No role assigned".into())))
}

/// Requires any assigned role. Rejects with 401 otherwise.
///
/// ```ignore
/// async fn read_only(RequireStaff(staff): RequireStaff) -> AppResult<Json<()>> {
///     tracing::info!(user_id = staff.user_id, role = %staff.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub UserRole);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let assignment = resolve_assignment(parts, state).await?;
        Ok(RequireStaff(assignment))
    }
}

/// Requires a role that may edit product images (`editor` and up).
/// Rejects with 403 Forbidden otherwise.
pub struct RequireImageEditor(pub UserRole);

impl FromRequestParts<AppState> for RequireImageEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let assignment = resolve_assignment(parts, state).await?;
        if !can_edit_images(assignment.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Image editing privileges required".into(),
            )));
        }
        Ok(RequireImageEditor(assignment))
    }
}

/// Requires a role that may edit products (`admin` and up).
/// Rejects with 403 Forbidden otherwise.
pub struct RequireProductEditor(pub UserRole);

impl FromRequestParts<AppState> for RequireProductEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let assignment = resolve_assignment(parts, state).await?;
        if !can_edit_products(assignment.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Product editing privileges required".into(),
            )));
        }
        Ok(RequireProductEditor(assignment))
    }
}
