//! Legacy `product_codes` row model.

use partsdesk_core::migration::{derive_product, CompatibilityData, GeneratedText, NewProduct};
use partsdesk_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the legacy `product_codes` table. The JSONB columns tolerate
/// partial shapes; every field inside them is optional.
#[derive(Debug, Clone, FromRow)]
pub struct ProductCode {
    pub id: DbId,
    pub compatibility_data: Option<Json<CompatibilityData>>,
    pub description_data: Option<Json<GeneratedText>>,
    pub product_code_data: Option<Json<GeneratedText>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductCode {
    /// Derive an insertable product from this row. Returns `None` when the
    /// row carries no usable generated code.
    pub fn derive(&self) -> Option<NewProduct> {
        derive_product(
            self.id,
            self.compatibility_data.as_ref().map(|json| &json.0),
            self.description_data.as_ref().map(|json| &json.0),
            self.product_code_data.as_ref().map(|json| &json.0),
        )
    }
}
