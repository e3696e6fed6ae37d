//! Product status and the partial-update payload accepted by the catalog
//! PATCH endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FieldErrors;
use crate::images::ProductImages;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Product lifecycle status as stored in `products.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Draft,
    Published,
    Archived,
}

impl ProductStatus {
    /// Return the status name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Parse a status string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// All valid status values.
    pub const ALL: &'static [&'static str] = &["draft", "published", "archived"];
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// Deserialize a nullable field so that an explicit JSON `null` becomes
/// `Some(None)` (clear the column) while an absent key stays `None`
/// (leave the column unchanged).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Fields accepted by `PATCH /products/{code}`. Absent fields are left
/// untouched; unknown JSON keys are ignored. `code`, `rhino_code`,
/// `rhino_description`, and `brands` are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub brand: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", rename = "subModel")]
    pub sub_model: Option<Option<String>>,
    pub status: Option<ProductStatus>,
    pub images: Option<ProductImages>,
}

impl ProductPatch {
    /// JSON names of every field present in the payload.
    pub fn supplied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.price.is_some() {
            fields.push("price");
        }
        if self.stock.is_some() {
            fields.push("stock");
        }
        if self.brand.is_some() {
            fields.push("brand");
        }
        if self.model.is_some() {
            fields.push("model");
        }
        if self.sub_model.is_some() {
            fields.push("subModel");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        if self.images.is_some() {
            fields.push("images");
        }
        fields
    }

    /// JSON names of supplied fields other than `images`.
    pub fn fields_beyond_images(&self) -> Vec<&'static str> {
        self.supplied_fields()
            .into_iter()
            .filter(|field| *field != "images")
            .collect()
    }

    /// Whether the payload carries no recognized field at all.
    pub fn is_empty(&self) -> bool {
        self.supplied_fields().is_empty()
    }

    /// Check every supplied field against the catalog rules. Absent fields
    /// are not checked.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Some(name) = &self.name {
            if name.is_empty() {
                errors.push("name", "Name is required");
            }
        }
        if let Some(description) = &self.description {
            if description.is_empty() {
                errors.push("description", "Description is required");
            }
        }
        if let Some(price) = self.price {
            if price < 0.0 {
                errors.push("price", "Price must be >= 0");
            }
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                errors.push("stock", "Stock must be >= 0");
            }
        }
        if let Some(images) = &self.images {
            images.validate_into(&mut errors);
        }

        errors.into_result()
    }
}
