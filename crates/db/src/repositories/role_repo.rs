//! Role resolution against the shared RBAC tables.

use partsdesk_core::roles::{RoleName, UserRole};
use partsdesk_core::types::DbId;
use sqlx::PgPool;

/// Provides role lookups for authenticated users.
pub struct RoleRepo;

impl RoleRepo {
    /// Resolve the role assigned to a user.
    ///
    /// `Ok(None)` means the user has no assignment; that is a valid outcome,
    /// not an error. A stored role name outside the known set is logged at
    /// WARN and also treated as no assignment. Infrastructure failures
    /// propagate as `sqlx::Error`.
    pub async fn resolve_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserRole>, sqlx::Error> {
        let row: Option<(String, i32)> = sqlx::query_as(
            "SELECT r.name, r.hierarchy_level
             FROM user_roles ur
             JOIN roles r ON r.id = ur.role_id
             WHERE ur.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.and_then(|(name, hierarchy_level)| match RoleName::from_str(&name) {
            Some(role) => Some(UserRole {
                user_id,
                role,
                hierarchy_level,
            }),
            None => {
                tracing::warn!(
                    user_id,
                    role_name = %name,
                    "unknown role name in user_roles, treating user as unassigned"
                );
                None
            }
        }))
    }
}
