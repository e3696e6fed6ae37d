//! Staff roles and permission predicates for the shared RBAC schema.
//!
//! Role names must match the seed data in
//! `20260825000001_create_roles_table.sql`.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Staff role, listed from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    SuperAdmin,
    Admin,
    Editor,
    QualityAssurance,
    Approver,
    Viewer,
}

impl RoleName {
    /// Return the role name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::QualityAssurance => "quality_assurance",
            Self::Approver => "approver",
            Self::Viewer => "viewer",
        }
    }

    /// Parse a role name. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "super_admin" => Some(Self::SuperAdmin),
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "quality_assurance" => Some(Self::QualityAssurance),
            "approver" => Some(Self::Approver),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// All valid role names.
    pub const ALL: &'static [&'static str] = &[
        "super_admin",
        "admin",
        "editor",
        "quality_assurance",
        "approver",
        "viewer",
    ];
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's resolved role assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserRole {
    pub user_id: DbId,
    pub role: RoleName,
    pub hierarchy_level: i32,
}

/// Whether a role may edit product fields beyond images (and run the
/// legacy migration).
pub fn can_edit_products(role: RoleName) -> bool {
    matches!(role, RoleName::SuperAdmin | RoleName::Admin)
}

/// Whether a role may edit product images and manage image blobs.
pub fn can_edit_images(role: RoleName) -> bool {
    can_edit_products(role) || matches!(role, RoleName::Editor)
}
