//! Cart repository.
//!
//! Cart lines snapshot the variant's name/weight/price at add time, copied
//! from the catalog server-side. No stock check happens here - stock is only
//! adjusted at checkout.

use sqlx::PgPool;

use greengrocer_core::{UserId, VariantId};

use super::RepositoryError;
use crate::models::cart::CartItem;

/// Internal row type for cart queries.
#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    id: i32,
    user_id: i32,
    product_id: i32,
    variant_id: i32,
    name: String,
    weight: String,
    price: i32,
    quantity: i32,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: greengrocer_core::CartItemId::new(row.id),
            user_id: UserId::new(row.user_id),
            product_id: greengrocer_core::ProductId::new(row.product_id),
            variant_id: VariantId::new(row.variant_id),
            name: row.name,
            weight: row.weight,
            price: row.price,
            quantity: row.quantity,
        }
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a customer's cart lines, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT id, user_id, product_id, variant_id, name, weight, price, quantity
            FROM shop.cart_item
            WHERE user_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Add a variant to the cart, merging quantity onto an existing line for
    /// the same variant. The product name, weight label and price are
    /// snapshotted from the catalog inside the statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the variant doesn't exist or
    /// its product is inactive.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        user_id: UserId,
        variant_id: VariantId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            r"
            INSERT INTO shop.cart_item (user_id, product_id, variant_id, name, weight, price, quantity)
            SELECT $1, p.id, v.id, p.name, v.weight, v.price, $3
            FROM shop.product_variant v
            JOIN shop.product p ON p.id = v.product_id
            WHERE v.id = $2 AND p.is_active = TRUE
            ON CONFLICT (user_id, variant_id)
            DO UPDATE SET quantity = cart_item.quantity + EXCLUDED.quantity
            RETURNING id, user_id, product_id, variant_id, name, weight, price, quantity
            ",
        )
        .bind(user_id.as_i32())
        .bind(variant_id.as_i32())
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Set the quantity of a cart line. A quantity of zero or less removes
    /// the line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_quantity(
        &self,
        user_id: UserId,
        variant_id: VariantId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        if quantity <= 0 {
            return self.remove(user_id, variant_id).await;
        }

        let result = sqlx::query(
            r"
            UPDATE shop.cart_item
            SET quantity = $3
            WHERE user_id = $1 AND variant_id = $2
            ",
        )
        .bind(user_id.as_i32())
        .bind(variant_id.as_i32())
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove(&self, user_id: UserId, variant_id: VariantId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.cart_item
            WHERE user_id = $1 AND variant_id = $2
            ",
        )
        .bind(user_id.as_i32())
        .bind(variant_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove every line of a customer's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM shop.cart_item WHERE user_id = $1")
            .bind(user_id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
