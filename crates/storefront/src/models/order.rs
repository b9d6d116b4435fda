//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use greengrocer_core::{OrderId, OrderItemId, OrderStatus, ProductId, UserId, VariantId};

/// A line item of an order.
///
/// Name, weight and price are snapshots taken at placement time. They are
/// intentionally decoupled from the live catalog so historical orders stay
/// accurate when products change or variants are recreated.
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
    /// Packing-slip verification flag, toggled by the back office.
    pub checked: bool,
}

impl OrderItem {
    /// Line total for this item.
    #[must_use]
    pub const fn line_total(&self) -> i64 {
        self.price as i64 * self.quantity as i64
    }
}

/// A customer order with its items.
///
/// Created once at checkout; afterwards only the status may change (via a
/// forward transition or cancellation) and items may gain their packing
/// `checked` flag. `total_amount` includes the delivery fee.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub total_amount: i64,
    pub address: String,
    pub phone: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Sum of item line totals (excludes the delivery fee).
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greengrocer_core::order_total;

    fn item(price: i32, quantity: i32) -> OrderItem {
        OrderItem {
            id: OrderItemId::new(1),
            order_id: OrderId::new(1),
            product_id: ProductId::new(1),
            variant_id: VariantId::new(1),
            name: "Fresh Tomatoes".to_string(),
            weight: "500g".to_string(),
            price,
            quantity,
            checked: false,
        }
    }

    #[test]
    fn test_total_amount_invariant() {
        // Cart [{price: 30, quantity: 2}] => subtotal 60, delivery 40, total 100.
        let order = Order {
            id: OrderId::new(1),
            user_id: UserId::new(1),
            total_amount: order_total(60),
            address: "123 Demo Street".to_string(),
            phone: "9876543210".to_string(),
            status: OrderStatus::Placed,
            created_at: Utc::now(),
            items: vec![item(30, 2)],
        };
        assert_eq!(order.subtotal(), 60);
        assert_eq!(order.total_amount, 100);
    }
}
