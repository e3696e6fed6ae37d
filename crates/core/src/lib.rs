//! Domain types, constants, and pure validation for the parts catalog.
//!
//! This crate has zero I/O and no async: everything here is usable from the
//! API layer, the repositories, and any future CLI tooling without pulling
//! in a runtime.

pub mod error;
pub mod images;
pub mod migration;
pub mod pagination;
pub mod product;
pub mod roles;
pub mod types;
