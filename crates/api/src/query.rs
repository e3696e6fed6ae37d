//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for the product listing
/// (`?page=&pageSize=&search=&status=`).
///
/// `page` is 1-based; both pagination values are clamped via
/// `partsdesk_core::pagination` before reaching the repository. A `status`
/// of `all` (or an empty string) means unfiltered.
#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
}
