//! Cart domain types.
//!
//! The cart is also kept client-side for snappy UI; the server copy is what
//! checkout reads, and it is cleared inside the placement transaction.

use serde::Serialize;

use greengrocer_core::{CartItemId, ProductId, UserId, VariantId};

/// One line of a customer's persisted cart.
///
/// Carries the same snapshot fields an order item will need, so checkout can
/// build the order without re-joining the catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub name: String,
    pub weight: String,
    pub price: i32,
    pub quantity: i32,
}

impl CartItem {
    /// Line total for this cart entry.
    #[must_use]
    pub const fn line_total(&self) -> i64 {
        self.price as i64 * self.quantity as i64
    }
}

/// Subtotal over a set of cart lines.
#[must_use]
pub fn subtotal(items: &[CartItem]) -> i64 {
    items.iter().map(CartItem::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i32, quantity: i32) -> CartItem {
        CartItem {
            id: CartItemId::new(1),
            user_id: UserId::new(1),
            product_id: ProductId::new(1),
            variant_id: VariantId::new(1),
            name: "Fresh Tomatoes".to_string(),
            weight: "500g".to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line(30, 2).line_total(), 60);
    }

    #[test]
    fn test_subtotal() {
        assert_eq!(subtotal(&[line(30, 2), line(55, 1)]), 115);
        assert_eq!(subtotal(&[]), 0);
    }
}
