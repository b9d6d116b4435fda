//! Read-side catalog repository.
//!
//! The shop only ever sees active products; deactivated ones stay in the
//! database for historical order references and the back office.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use greengrocer_core::{CategoryId, ProductId, VariantId};

use super::RepositoryError;
use crate::models::catalog::{Category, Product, ProductVariant};

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: String,
    image_url: String,
    category_id: Option<i32>,
    category_name: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, variants: Vec<ProductVariant>) -> Product {
        let category = match (self.category_id, self.category_name) {
            (Some(id), Some(name)) => Some(Category {
                id: CategoryId::new(id),
                name,
            }),
            _ => None,
        };

        Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            category_id: self.category_id.map(CategoryId::new),
            is_active: self.is_active,
            created_at: self.created_at,
            variants,
            category,
        }
    }
}

/// Internal row type for variant queries.
#[derive(Debug, sqlx::FromRow)]
struct VariantRow {
    id: i32,
    product_id: i32,
    weight: String,
    price: i32,
    stock: i32,
}

impl From<VariantRow> for ProductVariant {
    fn from(row: VariantRow) -> Self {
        Self {
            id: VariantId::new(row.id),
            product_id: ProductId::new(row.product_id),
            weight: row.weight,
            price: row.price,
            stock: row.stock,
        }
    }
}

/// Internal row type for category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
        }
    }
}

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, name ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, name
            FROM shop.category
            ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List active products, newest first, optionally filtered by category
    /// and a case-insensitive name search.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_products(
        &self,
        category: Option<CategoryId>,
        search: Option<&str>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT p.id, p.name, p.description, p.image_url, p.category_id,
                   c.name AS category_name, p.is_active, p.created_at
            FROM shop.product p
            LEFT JOIN shop.category c ON c.id = p.category_id
            WHERE p.is_active = TRUE
              AND ($1::int IS NULL OR p.category_id = $1)
              AND ($2::text IS NULL OR p.name ILIKE '%' || $2 || '%')
            ORDER BY p.created_at DESC
            ",
        )
        .bind(category.map(|c| c.as_i32()))
        .bind(search)
        .fetch_all(self.pool)
        .await?;

        self.attach_variants(rows).await
    }

    /// Get a single product with its variants.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT p.id, p.name, p.description, p.image_url, p.category_id,
                   c.name AS category_name, p.is_active, p.created_at
            FROM shop.product p
            LEFT JOIN shop.category c ON c.id = p.category_id
            WHERE p.id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(self.attach_variants(vec![r]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Load variants for a set of products and assemble domain models.
    async fn attach_variants(
        &self,
        rows: Vec<ProductRow>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

        let variant_rows = sqlx::query_as::<_, VariantRow>(
            r"
            SELECT id, product_id, weight, price, stock
            FROM shop.product_variant
            WHERE product_id = ANY($1)
            ORDER BY price ASC, id ASC
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_product: HashMap<i32, Vec<ProductVariant>> = HashMap::new();
        for v in variant_rows {
            by_product.entry(v.product_id).or_default().push(v.into());
        }

        Ok(rows
            .into_iter()
            .map(|r| {
                let variants = by_product.remove(&r.id).unwrap_or_default();
                r.into_product(variants)
            })
            .collect())
    }
}
