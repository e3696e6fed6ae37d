//! Repository for the legacy `product_codes` table. Read-only: the
//! migration scans it, nothing writes to it.

use sqlx::PgPool;

use crate::models::product_code::ProductCode;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, compatibility_data, description_data, product_code_data, created_at, updated_at";

/// Provides read operations for legacy product codes.
pub struct ProductCodeRepo;

impl ProductCodeRepo {
    /// Fetch one page of rows ordered by ID ascending.
    pub async fn fetch_page(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductCode>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM product_codes ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, ProductCode>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
