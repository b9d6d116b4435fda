//! Catalog domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use greengrocer_core::{CategoryId, ProductId, VariantId};

/// A product category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A purchasable size/weight option of a product.
///
/// Variants are owned by their product: when a product's variant set is
/// edited in the back office the whole set is deleted and recreated, so a
/// variant ID is only stable while the product is untouched. Order items
/// snapshot everything they need for exactly this reason.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    /// Free-text size descriptor, e.g. "500g" or "1kg".
    pub weight: String,
    /// Price in whole currency units. Always positive.
    pub price: i32,
    /// Units available. Never negative under the default stock policy.
    pub stock: i32,
}

/// A shop product with its variants.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category_id: Option<CategoryId>,
    /// Deactivated products are hidden from the shop but never deleted, so
    /// historical order items keep a valid product reference.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub variants: Vec<ProductVariant>,
    pub category: Option<Category>,
}
