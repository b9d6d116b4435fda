//! Order domain types as seen by the back office.

use chrono::{DateTime, Utc};
use serde::Serialize;

use greengrocer_core::{OrderId, OrderItemId, OrderStatus, ProductId, UserId, VariantId};

/// A line item of an order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub name: String,
    pub weight: String,
    pub price: i32,
    pub quantity: i32,
    /// Packing-slip verification flag.
    pub checked: bool,
}

/// The customer an order belongs to, as shown in admin views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdentity {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// An order with items and customer identity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    pub id: OrderId,
    pub user_id: UserId,
    pub total_amount: i64,
    pub address: String,
    pub phone: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub customer: CustomerIdentity,
}
