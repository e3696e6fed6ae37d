//! Repository for the `products` table.

use partsdesk_core::images::ProductImages;
use partsdesk_core::migration::NewProduct;
use partsdesk_core::product::ProductPatch;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::product::{Product, ProductListQuery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, product_code_id, code, name, description, price, stock, \
    rhino_code, rhino_description, brand, brands, model, sub_model, \
    images, status, created_at, updated_at";

/// Column list for the migration insert (excludes auto-generated columns).
const INSERT_COLUMNS: &str = "\
    product_code_id, code, name, description, price, stock, \
    rhino_code, rhino_description, brand, brands, model, sub_model, \
    images, status";

/// Bind parameters per row in `insert_missing`.
const INSERT_PARAMS: u32 = 14;

/// Provides query and update operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// List products matching the filter, most recently created first.
    pub async fn search(
        pool: &PgPool,
        params: &ProductListQuery,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let (where_clause, binds, bind_idx) = build_product_filter(params);

        let query = format!(
            "SELECT {COLUMNS} FROM products {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, Product>(&query);
        for value in &binds {
            q = q.bind(value.as_str());
        }
        q.bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await
    }

    /// Count products matching the filter, independent of pagination.
    pub async fn count(pool: &PgPool, params: &ProductListQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, binds, _) = build_product_filter(params);

        let query = format!("SELECT COUNT(*)::BIGINT FROM products {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in &binds {
            q = q.bind(value.as_str());
        }
        q.fetch_one(pool).await
    }

    /// Find a product by its business code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE code = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Replace only the `images` column.
    ///
    /// Returns `None` if no row with the given `code` exists.
    pub async fn update_images(
        pool: &PgPool,
        code: &str,
        images: &ProductImages,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET images = $2, updated_at = NOW() \
             WHERE code = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(code)
            .bind(Json(images))
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update. Only supplied fields are written; `brand`,
    /// `model`, and `sub_model` take an explicit null to clear.
    ///
    /// Returns `None` if no row with the given `code` exists.
    pub async fn update_by_code(
        pool: &PgPool,
        code: &str,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, sqlx::Error> {
        // For the nullable triple: if the outer Option is Some, use the inner
        // value (which may be None to clear). Otherwise keep the existing one.
        let brand_provided = patch.brand.is_some();
        let brand_value = patch.brand.as_ref().and_then(|v| v.as_deref());
        let model_provided = patch.model.is_some();
        let model_value = patch.model.as_ref().and_then(|v| v.as_deref());
        let sub_model_provided = patch.sub_model.is_some();
        let sub_model_value = patch.sub_model.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE products SET \
                 name        = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 price       = COALESCE($4, price), \
                 stock       = COALESCE($5, stock), \
                 brand       = CASE WHEN $6 THEN $7 ELSE brand END, \
                 model       = CASE WHEN $8 THEN $9 ELSE model END, \
                 sub_model   = CASE WHEN $10 THEN $11 ELSE sub_model END, \
                 status      = COALESCE($12, status), \
                 images      = COALESCE($13, images), \
                 updated_at  = NOW() \
             WHERE code = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(code)
            .bind(&patch.name)
            .bind(&patch.description)
            .bind(patch.price)
            .bind(patch.stock)
            .bind(brand_provided)
            .bind(brand_value)
            .bind(model_provided)
            .bind(model_value)
            .bind(sub_model_provided)
            .bind(sub_model_value)
            .bind(patch.status.map(|status| status.as_str()))
            .bind(patch.images.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Insert derived products, skipping any whose `code` already exists
    /// (including duplicates within the batch itself).
    ///
    /// Uses a single multi-row INSERT. Returns the number of rows actually
    /// inserted as reported by PostgreSQL.
    pub async fn insert_missing(pool: &PgPool, batch: &[NewProduct]) -> Result<u64, sqlx::Error> {
        if batch.is_empty() {
            return Ok(0);
        }

        // Build a multi-row INSERT statement.
        let mut query = format!("INSERT INTO products ({INSERT_COLUMNS}) VALUES ");
        let mut param_idx = 1u32;
        let mut first = true;

        for _ in batch {
            if !first {
                query.push_str(", ");
            }
            first = false;
            query.push('(');
            for i in 0..INSERT_PARAMS {
                if i > 0 {
                    query.push_str(", ");
                }
                query.push_str(&format!("${param_idx}"));
                param_idx += 1;
            }
            query.push(')');
        }

        query.push_str(" ON CONFLICT (code) DO NOTHING");

        let mut q = sqlx::query(&query);
        for product in batch {
            q = q
                .bind(product.product_code_id)
                .bind(&product.code)
                .bind(&product.name)
                .bind(&product.description)
                .bind(product.price)
                .bind(product.stock)
                .bind(&product.rhino_code)
                .bind(&product.rhino_description)
                .bind(&product.brand)
                .bind(&product.brands)
                .bind(&product.model)
                .bind(&product.sub_model)
                .bind(Json(&product.images))
                .bind(product.status.as_str());
        }

        let result = q.execute(pool).await?;
        Ok(result.rows_affected())
    }
}

/// Build the WHERE clause and bind values for a product listing filter.
///
/// A `status` of `""` or `"all"` means unfiltered; the search pattern is
/// matched case-insensitively against `code`, `name`, and `brand`.
fn build_product_filter(params: &ProductListQuery) -> (String, Vec<String>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut binds: Vec<String> = Vec::new();

    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        conditions.push(format!(
            "(code ILIKE ${bind_idx} OR name ILIKE ${bind_idx} OR brand ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
        binds.push(format!("%{search}%"));
    }

    if let Some(status) = params
        .status
        .as_deref()
        .filter(|s| !s.is_empty() && *s != "all")
    {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        binds.push(status.to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, binds, bind_idx)
}
