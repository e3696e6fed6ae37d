//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod product_code_repo;
pub mod product_repo;
pub mod role_repo;

pub use product_code_repo::ProductCodeRepo;
pub use product_repo::ProductRepo;
pub use role_repo::RoleRepo;
