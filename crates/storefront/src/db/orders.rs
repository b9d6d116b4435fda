//! Order repository: placement, cancellation, and order reads.
//!
//! Placement and cancellation are the only two writers of variant stock.
//! Both run inside a single transaction so stock adjustments, the cart
//! clear and the order rows either all land or none do, and both adjust
//! stock with a single guarded `UPDATE` per variant - never an application
//! level read-modify-write - so concurrent orders on the same variant
//! cannot lose updates.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use greengrocer_core::{
    InvalidTransition, OrderId, OrderItemId, OrderStatus, ProductId, StockPolicy, UserId,
    VariantId, order_total,
};

use super::RepositoryError;
use crate::models::order::{Order, OrderItem};

/// Failure modes of the order lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Checkout with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A variant had less stock than the ordered quantity (reject policy),
    /// or no longer exists.
    #[error("insufficient stock for variant {variant_id}")]
    InsufficientStock {
        /// Variant that could not be decremented.
        variant_id: VariantId,
    },

    /// Unknown order ID.
    #[error("order not found")]
    NotFound,

    /// The order belongs to a different customer.
    #[error("order belongs to another customer")]
    Forbidden,

    /// The order's current status does not allow the operation.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// Underlying repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for OrderError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    total_amount: i64,
    address: String,
    phone: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn status(&self) -> Result<OrderStatus, RepositoryError> {
        self.status.parse().map_err(RepositoryError::DataCorruption)
    }

    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, RepositoryError> {
        let status = self.status()?;
        Ok(Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            total_amount: self.total_amount,
            address: self.address,
            phone: self.phone,
            status,
            created_at: self.created_at,
            items,
        })
    }
}

/// Internal row type for order item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    variant_id: i32,
    name: String,
    weight: String,
    price: i32,
    quantity: i32,
    checked: bool,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_id: ProductId::new(row.product_id),
            variant_id: VariantId::new(row.variant_id),
            name: row.name,
            weight: row.weight,
            price: row.price,
            quantity: row.quantity,
            checked: row.checked,
        }
    }
}

/// Internal row type for cart lines read during placement.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    product_id: i32,
    variant_id: i32,
    name: String,
    weight: String,
    price: i32,
    quantity: i32,
}

/// Repository for order lifecycle operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order from the customer's persisted cart.
    ///
    /// Runs as one transaction: decrement stock per variant, clear the cart,
    /// insert the order and its item snapshots. The stored total is computed
    /// here (subtotal plus delivery fee), never taken from the client.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyCart`] if the cart has no lines.
    /// - [`OrderError::InsufficientStock`] under [`StockPolicy::Reject`] when
    ///   a variant's stock is below the ordered quantity; nothing is applied.
    /// - [`OrderError::Repository`] for database failures.
    pub async fn place(
        &self,
        user_id: UserId,
        address: &str,
        phone: &str,
        policy: StockPolicy,
    ) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let cart = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT product_id, variant_id, name, weight, price, quantity
            FROM shop.cart_item
            WHERE user_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(&mut *tx)
        .await?;

        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        for line in &cart {
            adjust_stock(
                &mut tx,
                VariantId::new(line.variant_id),
                -line.quantity,
                policy,
            )
            .await?;
        }

        sqlx::query("DELETE FROM shop.cart_item WHERE user_id = $1")
            .bind(user_id.as_i32())
            .execute(&mut *tx)
            .await?;

        let subtotal: i64 = cart
            .iter()
            .map(|l| i64::from(l.price) * i64::from(l.quantity))
            .sum();
        let total = order_total(subtotal);

        let order_row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO shop.order (user_id, total_amount, address, phone, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, total_amount, address, phone, status, created_at
            ",
        )
        .bind(user_id.as_i32())
        .bind(total)
        .bind(address)
        .bind(phone)
        .bind(OrderStatus::Placed.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(cart.len());
        for line in &cart {
            let item_row = sqlx::query_as::<_, OrderItemRow>(
                r"
                INSERT INTO shop.order_item
                    (order_id, product_id, variant_id, name, weight, price, quantity)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, order_id, product_id, variant_id, name, weight, price,
                          quantity, checked
                ",
            )
            .bind(order_row.id)
            .bind(line.product_id)
            .bind(line.variant_id)
            .bind(&line.name)
            .bind(&line.weight)
            .bind(line.price)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item_row.into());
        }

        tx.commit().await?;

        tracing::info!(
            order_id = order_row.id,
            user_id = user_id.as_i32(),
            total,
            "order placed"
        );

        Ok(order_row.into_order(items)?)
    }

    /// Cancel a customer's own order while it is still PLACED, restoring
    /// each item's quantity to its variant's stock.
    ///
    /// The order row is locked for the duration of the transaction, so a
    /// concurrent cancellation or status change cannot interleave; a repeat
    /// cancellation fails the status check and changes nothing.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFound`] for an unknown order ID.
    /// - [`OrderError::Forbidden`] if the order belongs to someone else.
    /// - [`OrderError::InvalidTransition`] if the order is not PLACED.
    /// - [`OrderError::Repository`] for database failures.
    pub async fn cancel(&self, id: OrderId, user_id: UserId) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, total_amount, address, phone, status, created_at
            FROM shop.order
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OrderError::NotFound)?;

        if order_row.user_id != user_id.as_i32() {
            return Err(OrderError::Forbidden);
        }

        let status = order_row.status()?;
        if !status.is_cancellable() {
            return Err(InvalidTransition {
                from: status,
                to: OrderStatus::Cancelled,
            }
            .into());
        }

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_id, variant_id, name, weight, price,
                   quantity, checked
            FROM shop.order_item
            WHERE order_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(id.as_i32())
        .fetch_all(&mut *tx)
        .await?;

        // Exact inverse of placement's decrement, one adjustment per item.
        for item in &item_rows {
            adjust_stock(
                &mut tx,
                VariantId::new(item.variant_id),
                item.quantity,
                StockPolicy::Backorder,
            )
            .await?;
        }

        sqlx::query("UPDATE shop.order SET status = $2 WHERE id = $1")
            .bind(id.as_i32())
            .bind(OrderStatus::Cancelled.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(order_id = id.as_i32(), user_id = user_id.as_i32(), "order cancelled");

        let items = item_rows.into_iter().map(Into::into).collect();
        let mut order = order_row.into_order(items)?;
        order.status = OrderStatus::Cancelled;
        Ok(order)
    }

    /// List a customer's orders, newest first, items included.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Repository`] for database failures.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, total_amount, address, phone, status, created_at
            FROM shop.order
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        self.attach_items(rows).await
    }

    /// Fetch one of the customer's own orders.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFound`] for an unknown order ID.
    /// - [`OrderError::Forbidden`] if the order belongs to someone else.
    /// - [`OrderError::Repository`] for database failures.
    pub async fn get_for_user(&self, id: OrderId, user_id: UserId) -> Result<Order, OrderError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, total_amount, address, phone, status, created_at
            FROM shop.order
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(OrderError::NotFound)?;

        if row.user_id != user_id.as_i32() {
            return Err(OrderError::Forbidden);
        }

        let mut orders = self.attach_items(vec![row]).await?;
        orders.pop().ok_or(OrderError::NotFound)
    }

    /// Load items for a set of orders and assemble domain models.
    async fn attach_items(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, OrderError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_id, variant_id, name, weight, price,
                   quantity, checked
            FROM shop.order_item
            WHERE order_id = ANY($1)
            ORDER BY id ASC
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_order: std::collections::HashMap<i32, Vec<OrderItem>> =
            std::collections::HashMap::new();
        for item in item_rows {
            by_order
                .entry(item.order_id)
                .or_default()
                .push(item.into());
        }

        rows.into_iter()
            .map(|r| {
                let items = by_order.remove(&r.id).unwrap_or_default();
                r.into_order(items).map_err(OrderError::from)
            })
            .collect()
    }
}

/// Adjust a variant's stock by `delta` inside an open transaction.
///
/// Negative on placement, positive on cancellation. The adjustment is a
/// single SQL `UPDATE`, so the persistence layer's per-row atomicity rules
/// out lost updates between concurrent orders. Under
/// [`StockPolicy::Reject`] a decrement carries a `stock >= n` guard and
/// fails with [`OrderError::InsufficientStock`] instead of going negative.
///
/// An increment that matches no row is a no-op: the variant was deleted by
/// a catalog edit since placement, and restoration has nowhere to go.
async fn adjust_stock(
    tx: &mut Transaction<'_, Postgres>,
    variant_id: VariantId,
    delta: i32,
    policy: StockPolicy,
) -> Result<(), OrderError> {
    let result = if delta < 0 && policy == StockPolicy::Reject {
        sqlx::query(
            r"
            UPDATE shop.product_variant
            SET stock = stock + $2
            WHERE id = $1 AND stock >= -$2
            ",
        )
        .bind(variant_id.as_i32())
        .bind(delta)
        .execute(&mut **tx)
        .await?
    } else {
        sqlx::query(
            r"
            UPDATE shop.product_variant
            SET stock = stock + $2
            WHERE id = $1
            ",
        )
        .bind(variant_id.as_i32())
        .bind(delta)
        .execute(&mut **tx)
        .await?
    };

    if delta < 0 && result.rows_affected() == 0 {
        return Err(OrderError::InsufficientStock { variant_id });
    }

    Ok(())
}
