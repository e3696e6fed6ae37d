//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireStaff`] -- Requires any assigned role.
//! - [`rbac::RequireImageEditor`] -- Requires a role that may edit product images.
//! - [`rbac::RequireProductEditor`] -- Requires a role that may edit products.

pub mod auth;
pub mod rbac;
