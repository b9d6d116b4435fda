//! Catalog domain types and edit inputs for the back office.
//!
//! Unlike the storefront's read side, the admin sees inactive products and
//! owns the write path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use greengrocer_core::{CategoryId, ProductId, VariantId};

/// A product category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A purchasable size/weight option of a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub weight: String,
    pub price: i32,
    pub stock: i32,
}

/// A product with its variants, as managed by the back office.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category_id: Option<CategoryId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub variants: Vec<ProductVariant>,
    pub category: Option<Category>,
}

/// One variant of a product create/update request.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantInput {
    pub weight: String,
    pub price: i32,
    pub stock: i32,
}

/// Product creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub category_id: Option<i32>,
    pub variants: Vec<VariantInput>,
}

/// Product update request.
///
/// The variant list replaces the product's current variants wholesale.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub category_id: Option<i32>,
    pub is_active: bool,
    #[serde(default)]
    pub variants: Vec<VariantInput>,
}
