//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Paginated `{ "data": [...], "count": N, "page": P, "pageSize": S }`
/// listing envelope.
///
/// `count` is the total number of matching rows, independent of the page
/// being returned, so clients can derive the page count.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub count: i64,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}
