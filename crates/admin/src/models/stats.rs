//! Dashboard statistics.
//!
//! A pure read-side derivation, recomputed per request.

use chrono::{DateTime, Utc};
use serde::Serialize;

use greengrocer_core::{OrderId, OrderStatus};

/// One of the five most recent orders shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: OrderId,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
}

/// Aggregate dashboard snapshot.
///
/// `total_revenue` excludes cancelled orders; the counts do not.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_orders: i64,
    pub total_customers: i64,
    pub total_revenue: i64,
    pub recent_orders: Vec<RecentOrder>,
}
