//! Handler for the caller's own role.

use axum::Json;
use partsdesk_core::roles::RoleName;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;

/// The caller's resolved role assignment.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: RoleName,
    #[serde(rename = "hierarchyLevel")]
    pub hierarchy_level: i32,
}

// ---------------------------------------------------------------------------
// GET /me/role
// ---------------------------------------------------------------------------

/// Return the caller's role as currently assigned in the database. Clients
/// use this to decide which admin surfaces to render; the server enforces
/// the same predicates on every write regardless.
pub async fn get_role(RequireStaff(staff): RequireStaff) -> AppResult<Json<RoleResponse>> {
    Ok(Json(RoleResponse {
        role: staff.role,
        hierarchy_level: staff.hierarchy_level,
    }))
}
