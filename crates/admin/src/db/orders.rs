//! Order views and transitions for the back office.
//!
//! The admin surface only ever moves an order forward through the pipeline;
//! cancellation (with its stock restoration) is the customer's operation and
//! lives in the storefront. Ordinary status changes touch nothing but the
//! stored status value.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use greengrocer_core::{
    InvalidTransition, OrderId, OrderItemId, OrderStatus, ProductId, UserId, VariantId,
};

use super::RepositoryError;
use crate::models::order::{AdminOrder, CustomerIdentity, OrderItem};

/// Failure modes of admin order operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Unknown order or order item ID.
    #[error("order not found")]
    NotFound,

    /// The order's current status does not allow the requested step.
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

/// Internal row type for order queries joined with customer identity.
#[derive(Debug, sqlx::FromRow)]
struct AdminOrderRow {
    id: i32,
    user_id: i32,
    total_amount: i64,
    address: String,
    phone: String,
    status: String,
    created_at: DateTime<Utc>,
    customer_name: String,
    customer_email: String,
}

impl AdminOrderRow {
    fn status(&self) -> Result<OrderStatus, RepositoryError> {
        self.status.parse().map_err(RepositoryError::DataCorruption)
    }

    fn into_order(self, items: Vec<OrderItem>) -> Result<AdminOrder, RepositoryError> {
        let status = self.status()?;
        Ok(AdminOrder {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            total_amount: self.total_amount,
            address: self.address,
            phone: self.phone,
            status,
            created_at: self.created_at,
            items,
            customer: CustomerIdentity {
                id: UserId::new(self.user_id),
                name: self.customer_name,
                email: self.customer_email,
            },
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

const ORDER_SELECT: &str = r"
    SELECT o.id, o.user_id, o.total_amount, o.address, o.phone, o.status,
           o.created_at, u.name AS customer_name, u.email AS customer_email
    FROM shop.order o
    JOIN shop.user u ON u.id = o.user_id
";

/// Repository for admin order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every order, newest first, with items and customer identity.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Repository`] for database failures.
    pub async fn list_all(&self) -> Result<Vec<AdminOrder>, OrderError> {
        let sql = format!("{ORDER_SELECT} ORDER BY o.created_at DESC");
        let rows = sqlx::query_as::<_, AdminOrderRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        self.attach_items(rows).await
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFound`] for an unknown ID.
    /// - [`OrderError::Repository`] for database failures.
    pub async fn get(&self, id: OrderId) -> Result<AdminOrder, OrderError> {
        let sql = format!("{ORDER_SELECT} WHERE o.id = $1");
        let row = sqlx::query_as::<_, AdminOrderRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?
            .ok_or(OrderError::NotFound)?;

        let mut orders = self.attach_items(vec![row]).await?;
        orders.pop().ok_or(OrderError::NotFound)
    }

    /// Move an order forward through the fulfilment pipeline.
    ///
    /// The transition is validated against the order's current status and
    /// applied with a guarded update (`WHERE status = current`), so two
    /// concurrent transitions cannot both win. No stock is touched.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFound`] for an unknown ID.
    /// - [`OrderError::InvalidTransition`] if the step is not a forward move
    ///   among the active states (this includes any attempt at CANCELLED).
    /// - [`OrderError::Repository`] for database failures.
    pub async fn set_status(&self, id: OrderId, to: OrderStatus) -> Result<AdminOrder, OrderError> {
        // Statuses only move forward, so a lost race either still permits
        // the step on re-read or fails validation; the loop cannot spin.
        loop {
            let order = self.get(id).await?;
            order.status.transition_to(to)?;

            let result = sqlx::query(
                r"
                UPDATE shop.order
                SET status = $2
                WHERE id = $1 AND status = $3
                ",
            )
            .bind(id.as_i32())
            .bind(to.as_str())
            .bind(order.status.as_str())
            .execute(self.pool)
            .await?;

            if result.rows_affected() > 0 {
                tracing::info!(
                    order_id = id.as_i32(),
                    from = %order.status,
                    to = %to,
                    "order status updated"
                );
                return self.get(id).await;
            }
        }
    }

    /// Toggle an order item's packing-verification flag.
    ///
    /// Independent of the order's status; used by packing-slip workflows.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFound`] for an unknown item ID.
    /// - [`OrderError::Repository`] for database failures.
    pub async fn set_item_checked(
        &self,
        order_id: OrderId,
        item_id: OrderItemId,
        checked: bool,
    ) -> Result<OrderItem, OrderError> {
        let row = sqlx::query_as::<_, OrderItemRow>(
            r"
            UPDATE shop.order_item
            SET checked = $3
            WHERE id = $2 AND order_id = $1
            RETURNING id, order_id, product_id, variant_id, name, weight, price,
                      quantity, checked
            ",
        )
        .bind(order_id.as_i32())
        .bind(item_id.as_i32())
        .bind(checked)
        .fetch_optional(self.pool)
        .await?
        .ok_or(OrderError::NotFound)?;

        Ok(row.into())
    }

    /// Load items for a set of orders and assemble domain models.
    async fn attach_items(&self, rows: Vec<AdminOrderRow>) -> Result<Vec<AdminOrder>, OrderError> {
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

        let mut by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
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
