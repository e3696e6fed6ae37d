//! Request handlers for the catalog administration API.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `partsdesk_db` and the blob
//! store in `partsdesk_blob`, and map errors via [`crate::error::AppError`].

pub mod me;
pub mod migration;
pub mod products;
pub mod uploads;
