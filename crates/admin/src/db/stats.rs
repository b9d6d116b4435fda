//! Dashboard aggregation.
//!
//! Pure read-side derivation with no caching; every request recomputes.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use greengrocer_core::OrderId;

use super::RepositoryError;
use crate::models::stats::{DashboardStats, RecentOrder};

/// Internal row type for the aggregate counters.
#[derive(Debug, sqlx::FromRow)]
struct TotalsRow {
    total_products: i64,
    total_orders: i64,
    total_customers: i64,
    total_revenue: i64,
}

/// Internal row type for recent order queries.
#[derive(Debug, sqlx::FromRow)]
struct RecentOrderRow {
    id: i32,
    total_amount: i64,
    status: String,
    created_at: DateTime<Utc>,
    customer_name: String,
    customer_email: String,
}

impl RecentOrderRow {
    fn into_recent(self) -> Result<RecentOrder, RepositoryError> {
        let status = self.status.parse().map_err(RepositoryError::DataCorruption)?;
        Ok(RecentOrder {
            id: OrderId::new(self.id),
            total_amount: self.total_amount,
            status,
            created_at: self.created_at,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
        })
    }
}

/// Repository for dashboard statistics.
pub struct StatsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepository<'a> {
    /// Create a new stats repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Compute the dashboard snapshot.
    ///
    /// Revenue sums `total_amount` over every order that is not CANCELLED;
    /// the counts are plain counts (active products only).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn dashboard(&self) -> Result<DashboardStats, RepositoryError> {
        let totals = sqlx::query_as::<_, TotalsRow>(
            r"
            SELECT
                (SELECT COUNT(*) FROM shop.product WHERE is_active = TRUE) AS total_products,
                (SELECT COUNT(*) FROM shop.order) AS total_orders,
                (SELECT COUNT(*) FROM shop.user) AS total_customers,
                (SELECT COALESCE(SUM(total_amount), 0)::bigint
                 FROM shop.order
                 WHERE status <> 'CANCELLED') AS total_revenue
            ",
        )
        .fetch_one(self.pool)
        .await?;

        let recent_rows = sqlx::query_as::<_, RecentOrderRow>(
            r"
            SELECT o.id, o.total_amount, o.status, o.created_at,
                   u.name AS customer_name, u.email AS customer_email
            FROM shop.order o
            JOIN shop.user u ON u.id = o.user_id
            ORDER BY o.created_at DESC
            LIMIT 5
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let recent_orders = recent_rows
            .into_iter()
            .map(RecentOrderRow::into_recent)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DashboardStats {
            total_products: totals.total_products,
            total_orders: totals.total_orders,
            total_customers: totals.total_customers,
            total_revenue: totals.total_revenue,
            recent_orders,
        })
    }
}
