//! List pagination bounds shared by the API layer and the repositories.

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum number of products per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided 1-based page number.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1).min(MAX_PAGE_SIZE)
}

/// Row offset for a clamped page/size pair.
pub fn offset(page: i64, page_size: i64) -> i64 {
    (page - 1) * page_size
}
