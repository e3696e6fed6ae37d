//! Product catalog models and query types.

use partsdesk_core::images::ProductImages;
use partsdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `products` table.
///
/// `status` holds the raw column value; writes go through the
/// `partsdesk_core::product::ProductStatus` enum, so anything read back is
/// one of the known names. `sub_model` keeps its legacy camelCase wire name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub product_code_id: Option<DbId>,
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub rhino_code: String,
    pub rhino_description: String,
    pub brand: Option<String>,
    pub brands: Vec<String>,
    pub model: Option<String>,
    #[serde(rename = "subModel")]
    pub sub_model: Option<String>,
    pub images: Json<ProductImages>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filter parameters for product listings. The API layer clamps `limit`
/// and `offset` before handing the query to the repository.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
