//! Domain model structs and query types.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row, plus any query/filter types the repositories take. Partial-update
//! payloads live in `partsdesk_core` because they carry validation rules.

pub mod product;
pub mod product_code;

pub use product::{Product, ProductListQuery};
pub use product_code::ProductCode;
