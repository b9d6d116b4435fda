//! Product and category management repository.
//!
//! The back office owns the catalog write path. Editing a product replaces
//! its variant set wholesale; deleting a product only deactivates it so
//! historical order items keep a valid reference.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use greengrocer_core::{CategoryId, ProductId, VariantId};

use super::RepositoryError;
use crate::models::catalog::{
    Category, CreateProductInput, Product, ProductVariant, UpdateProductInput, VariantInput,
};

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

const PRODUCT_SELECT: &str = r"
    SELECT p.id, p.name, p.description, p.image_url, p.category_id,
           c.name AS category_name, p.is_active, p.created_at
    FROM shop.product p
    LEFT JOIN shop.category c ON c.id = p.category_id
";

/// Repository for catalog management.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, newest first. Inactive products are included only when
    /// `include_inactive` is set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "{PRODUCT_SELECT} WHERE ($1 OR p.is_active = TRUE) ORDER BY p.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(include_inactive)
            .fetch_all(self.pool)
            .await?;

        self.attach_variants(rows).await
    }

    /// Get a single product with its variants.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(r) => Ok(self.attach_variants(vec![r]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Create a product with its variants.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing
    /// is created in that case.
    pub async fn create(&self, input: &CreateProductInput) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO shop.product (name, description, image_url, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, image_url, category_id,
                      NULL::text AS category_name, is_active, created_at
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.category_id)
        .fetch_one(&mut *tx)
        .await?;

        let variants = insert_variants(&mut tx, row.id, &input.variants).await?;

        tx.commit().await?;

        tracing::info!(product_id = row.id, "product created");

        // Re-read outside the transaction to pick up the category name.
        self.get(ProductId::new(row.id))
            .await?
            .map_or_else(|| Ok(row.into_product(variants)), Ok)
    }

    /// Update a product, replacing its variant set wholesale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        input: &UpdateProductInput,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE shop.product
            SET name = $2, description = $3, image_url = $4, category_id = $5,
                is_active = $6
            WHERE id = $1
            RETURNING id, name, description, image_url, category_id,
                      NULL::text AS category_name, is_active, created_at
            ",
        )
        .bind(id.as_i32())
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.category_id)
        .bind(input.is_active)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query("DELETE FROM shop.product_variant WHERE product_id = $1")
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;

        let variants = insert_variants(&mut tx, row.id, &input.variants).await?;

        tx.commit().await?;

        self.get(ProductId::new(row.id))
            .await?
            .map_or_else(|| Ok(row.into_product(variants)), Ok)
    }

    /// Soft-delete a product by deactivating it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn deactivate(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE shop.product SET is_active = FALSE WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(product_id = id.as_i32(), "product deactivated");
        Ok(())
    }

    /// List all categories, name ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name FROM shop.category ORDER BY name ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_category(&self, name: &str) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO shop.category (name)
            VALUES ($1)
            RETURNING id, name
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("category already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
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

/// Insert a variant set for a product inside an open transaction.
async fn insert_variants(
    tx: &mut Transaction<'_, Postgres>,
    product_id: i32,
    inputs: &[VariantInput],
) -> Result<Vec<ProductVariant>, RepositoryError> {
    let mut variants = Vec::with_capacity(inputs.len());
    for input in inputs {
        let row = sqlx::query_as::<_, VariantRow>(
            r"
            INSERT INTO shop.product_variant (product_id, weight, price, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, weight, price, stock
            ",
        )
        .bind(product_id)
        .bind(&input.weight)
        .bind(input.price)
        .bind(input.stock)
        .fetch_one(&mut **tx)
        .await?;
        variants.push(row.into());
    }

    Ok(variants)
}
