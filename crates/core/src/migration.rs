//! Pure mapping from legacy `product_codes` rows to catalog products.
//!
//! The legacy system stored machine-generated text in three loosely shaped
//! JSONB columns. This module owns the serde shapes for those columns and
//! the derivation of an insertable product from them; paging and batch
//! insertion live in the repositories and the migration handler.

use serde::{Deserialize, Serialize};

use crate::images::ProductImages;
use crate::product::ProductStatus;
use crate::types::DbId;

/// Rows fetched per page while scanning `product_codes`.
pub const CODE_PAGE_SIZE: i64 = 1000;

/// Products inserted per batch.
pub const INSERT_BATCH_SIZE: usize = 500;

/// `{ "generated": ... }` wrapper used by the legacy description and
/// product-code columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    #[serde(default)]
    pub generated: Option<String>,
}

/// One vehicle-fitment entry from the legacy compatibility list. Field
/// names are the legacy Spanish JSON keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityItem {
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default, rename = "subModelo")]
    pub sub_modelo: Option<String>,
}

/// Legacy `compatibility_data` column payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityData {
    #[serde(default)]
    pub generated: Option<String>,
    #[serde(default)]
    pub items: Vec<CompatibilityItem>,
}

/// A fully derived product ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_code_id: DbId,
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
    pub sub_model: Option<String>,
    pub images: ProductImages,
    pub status: ProductStatus,
}

/// Order-stable dedup of non-empty `marca` values across fitment entries.
pub fn dedup_brands(items: &[CompatibilityItem]) -> Vec<String> {
    // Bounded by the handful of fitment rows a code carries; a linear scan
    // keeps first-seen order without an extra set.
    let mut brands: Vec<String> = Vec::new();
    for item in items {
        if let Some(marca) = item.marca.as_deref() {
            if !marca.is_empty() && !brands.iter().any(|known| known == marca) {
                brands.push(marca.to_string());
            }
        }
    }
    brands
}

/// Derive a product from one legacy row. Returns `None` when the row has
/// no usable generated code: such rows are dropped, never failed.
///
/// `model` and `sub_model` come from the first fitment entry only; the
/// remaining entries contribute nothing beyond `brands`.
pub fn derive_product(
    product_code_id: DbId,
    compatibility: Option<&CompatibilityData>,
    description: Option<&GeneratedText>,
    product_code: Option<&GeneratedText>,
) -> Option<NewProduct> {
    let code = product_code
        .and_then(|field| field.generated.as_deref())
        .unwrap_or_default();
    if code.is_empty() {
        return None;
    }

    let items = compatibility.map(|data| data.items.as_slice()).unwrap_or(&[]);
    let brands = dedup_brands(items);
    let brand = brands.first().cloned();
    let first = items.first();
    let description_text = description
        .and_then(|field| field.generated.clone())
        .unwrap_or_default();

    Some(NewProduct {
        product_code_id,
        code: code.to_string(),
        name: compatibility
            .and_then(|data| data.generated.clone())
            .unwrap_or_default(),
        description: description_text.clone(),
        price: 0.0,
        stock: 0,
        rhino_code: code.to_string(),
        rhino_description: description_text,
        brand,
        brands,
        model: first.and_then(|item| item.modelo.clone()),
        sub_model: first.and_then(|item| item.sub_modelo.clone()),
        images: ProductImages::empty(),
        status: ProductStatus::Draft,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(marca: Option<&str>, modelo: Option<&str>, sub_modelo: Option<&str>) -> CompatibilityItem {
        CompatibilityItem {
            marca: marca.map(str::to_string),
            modelo: modelo.map(str::to_string),
            sub_modelo: sub_modelo.map(str::to_string),
        }
    }

    fn generated(text: &str) -> GeneratedText {
        GeneratedText {
            generated: Some(text.to_string()),
        }
    }

    // -- shape tests --------------------------------------------------------

    #[test]
    fn compatibility_data_tolerates_missing_fields() {
        let data: CompatibilityData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.generated, None);
        assert!(data.items.is_empty());

        let data: CompatibilityData =
            serde_json::from_str(r#"{ "items": [{ "marca": "Fiat", "subModelo": "Adventure" }] }"#)
                .unwrap();
        assert_eq!(data.items[0].marca.as_deref(), Some("Fiat"));
        assert_eq!(data.items[0].modelo, None);
        assert_eq!(data.items[0].sub_modelo.as_deref(), Some("Adventure"));
    }

    // -- dedup tests --------------------------------------------------------

    #[test]
    fn brands_dedup_keeps_first_seen_order() {
        let items = vec![
            item(Some("A"), None, None),
            item(Some("B"), None, None),
            item(Some("A"), None, None),
        ];
        assert_eq!(dedup_brands(&items), vec!["A", "B"]);
    }

    #[test]
    fn empty_and_missing_brands_are_skipped() {
        let items = vec![
            item(None, Some("Uno"), None),
            item(Some(""), None, None),
            item(Some("Fiat"), None, None),
        ];
        assert_eq!(dedup_brands(&items), vec!["Fiat"]);
    }

    // -- derivation tests ---------------------------------------------------

    #[test]
    fn row_without_generated_code_is_dropped() {
        assert_eq!(derive_product(1, None, None, None), None);
        assert_eq!(
            derive_product(1, None, None, Some(&GeneratedText { generated: None })),
            None
        );
        assert_eq!(derive_product(1, None, None, Some(&generated(""))), None);
    }

    #[test]
    fn derived_product_mirrors_legacy_fields() {
        let compatibility = CompatibilityData {
            generated: Some("Brake pad set".to_string()),
            items: vec![
                item(Some("Fiat"), Some("Uno"), Some("Attractive")),
                item(Some("Peugeot"), Some("208"), None),
                item(Some("Fiat"), Some("Palio"), None),
            ],
        };

        let product = derive_product(
            42,
            Some(&compatibility),
            Some(&generated("Front axle, 4 pads")),
            Some(&generated("BP-0042")),
        )
        .unwrap();

        assert_eq!(product.product_code_id, 42);
        assert_eq!(product.code, "BP-0042");
        assert_eq!(product.name, "Brake pad set");
        assert_eq!(product.description, "Front axle, 4 pads");
        assert_eq!(product.rhino_code, "BP-0042");
        assert_eq!(product.rhino_description, "Front axle, 4 pads");
        assert_eq!(product.brands, vec!["Fiat", "Peugeot"]);
        assert_eq!(product.brand.as_deref(), Some("Fiat"));
        // First fitment entry only.
        assert_eq!(product.model.as_deref(), Some("Uno"));
        assert_eq!(product.sub_model.as_deref(), Some("Attractive"));
    }

    #[test]
    fn missing_optional_columns_fall_back_to_blank_defaults() {
        let product = derive_product(7, None, None, Some(&generated("X-1"))).unwrap();

        assert_eq!(product.name, "");
        assert_eq!(product.description, "");
        assert_eq!(product.rhino_description, "");
        assert_eq!(product.brand, None);
        assert!(product.brands.is_empty());
        assert_eq!(product.model, None);
        assert_eq!(product.sub_model, None);
        assert_eq!(product.price, 0.0);
        assert_eq!(product.stock, 0);
        assert_eq!(product.status, ProductStatus::Draft);
        assert_eq!(product.images, ProductImages::empty());
    }
}
