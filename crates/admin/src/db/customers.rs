//! Customer listing for the back office.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use greengrocer_core::{OrderId, UserId};

use super::RepositoryError;
use crate::models::customer::{Customer, CustomerWithOrders, OrderSummary};

/// Internal row type for customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for order summary queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderSummaryRow {
    id: i32,
    user_id: i32,
    total_amount: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl OrderSummaryRow {
    fn into_summary(self) -> Result<OrderSummary, RepositoryError> {
        let status = self.status.parse().map_err(RepositoryError::DataCorruption)?;
        Ok(OrderSummary {
            id: OrderId::new(self.id),
            total_amount: self.total_amount,
            status,
            created_at: self.created_at,
        })
    }
}

/// Repository for customer reads.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every customer, newest first, with their order summaries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` on an unknown stored status.
    pub async fn list(&self) -> Result<Vec<CustomerWithOrders>, RepositoryError> {
        let customer_rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, email, phone, address, created_at
            FROM shop.user
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<i32> = customer_rows.iter().map(|r| r.id).collect();

        let order_rows = sqlx::query_as::<_, OrderSummaryRow>(
            r"
            SELECT id, user_id, total_amount, status, created_at
            FROM shop.order
            WHERE user_id = ANY($1)
            ORDER BY created_at DESC
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_user: HashMap<i32, Vec<OrderSummary>> = HashMap::new();
        for row in order_rows {
            let user_id = row.user_id;
            by_user
                .entry(user_id)
                .or_default()
                .push(row.into_summary()?);
        }

        Ok(customer_rows
            .into_iter()
            .map(|r| {
                let orders = by_user.remove(&r.id).unwrap_or_default();
                CustomerWithOrders {
                    customer: r.into(),
                    orders,
                }
            })
            .collect())
    }
}
