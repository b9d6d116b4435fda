//! Order lifecycle status and its transition rules.
//!
//! An order moves strictly forward through the fulfilment pipeline:
//!
//! ```text
//! PLACED -> PACKING -> DISPATCHED -> DELIVERED
//!    \
//!     -> CANCELLED
//! ```
//!
//! `DELIVERED` and `CANCELLED` are terminal. `CANCELLED` is reachable only
//! from `PLACED`, and only through the cancellation operation - the generic
//! status-set operation never produces it.

use serde::{Deserialize, Serialize};

/// Order lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Placed,
    Packing,
    Dispatched,
    Delivered,
    Cancelled,
}

/// A rejected status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid order status transition: {from} -> {to}")]
pub struct InvalidTransition {
    /// Status the order was in.
    pub from: OrderStatus,
    /// Status that was requested.
    pub to: OrderStatus,
}

impl OrderStatus {
    /// All states, in pipeline order (terminal sideways state last).
    pub const ALL: [Self; 5] = [
        Self::Placed,
        Self::Packing,
        Self::Dispatched,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Whether no further transition is allowed out of this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether the order may still be cancelled by the customer.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Placed)
    }

    /// The next forward step in the fulfilment pipeline, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Placed => Some(Self::Packing),
            Self::Packing => Some(Self::Dispatched),
            Self::Dispatched => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Whether the generic status-set operation may move `self` to `to`.
    ///
    /// Only forward movement among the four active states is allowed;
    /// `Cancelled` is never a valid target here (cancellation is its own
    /// operation with stock restoration attached).
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        match to {
            Self::Cancelled => false,
            Self::Placed | Self::Packing | Self::Dispatched | Self::Delivered => {
                (self.rank()) < to.rank()
            }
        }
    }

    /// Validate a status-set request, returning the error the API surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] when the move is not allowed.
    pub const fn transition_to(self, to: Self) -> Result<Self, InvalidTransition> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }

    /// Position in the forward pipeline. `Cancelled` sorts last.
    const fn rank(self) -> u8 {
        match self {
            Self::Placed => 0,
            Self::Packing => 1,
            Self::Dispatched => 2,
            Self::Delivered => 3,
            Self::Cancelled => 4,
        }
    }

    /// Stored/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "PLACED",
            Self::Packing => "PACKING",
            Self::Dispatched => "DISPATCHED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLACED" => Ok(Self::Placed),
            "PACKING" => Ok(Self::Packing),
            "DISPATCHED" => Ok(Self::Dispatched),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_forward_pipeline() {
        assert!(OrderStatus::Placed.can_transition_to(OrderStatus::Packing));
        assert!(OrderStatus::Packing.can_transition_to(OrderStatus::Dispatched));
        assert!(OrderStatus::Dispatched.can_transition_to(OrderStatus::Delivered));

        // Skipping ahead is forward movement and allowed.
        assert!(OrderStatus::Placed.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_no_backward_movement() {
        assert!(!OrderStatus::Packing.can_transition_to(OrderStatus::Placed));
        assert!(!OrderStatus::Dispatched.can_transition_to(OrderStatus::Packing));
        assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Placed));
    }

    #[test]
    fn test_terminal_states_absorb() {
        for to in OrderStatus::ALL {
            assert!(!OrderStatus::Delivered.can_transition_to(to));
            assert!(!OrderStatus::Cancelled.can_transition_to(to));
        }
    }

    #[test]
    fn test_cancelled_unreachable_via_status_set() {
        for from in OrderStatus::ALL {
            assert!(!from.can_transition_to(OrderStatus::Cancelled));
        }
    }

    #[test]
    fn test_only_placed_is_cancellable() {
        assert!(OrderStatus::Placed.is_cancellable());
        assert!(!OrderStatus::Packing.is_cancellable());
        assert!(!OrderStatus::Dispatched.is_cancellable());
        assert!(!OrderStatus::Delivered.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn test_transition_to_reports_endpoints() {
        let err = OrderStatus::Delivered
            .transition_to(OrderStatus::Packing)
            .expect_err("terminal state must reject");
        assert_eq!(err.from, OrderStatus::Delivered);
        assert_eq!(err.to, OrderStatus::Packing);
    }

    #[test]
    fn test_str_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(
                OrderStatus::from_str(status.as_str()).expect("round trip"),
                status
            );
        }
        assert!(OrderStatus::from_str("SHIPPED").is_err());
    }

    #[test]
    fn test_next_walks_pipeline() {
        assert_eq!(OrderStatus::Placed.next(), Some(OrderStatus::Packing));
        assert_eq!(OrderStatus::Dispatched.next(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next(), None);
        assert_eq!(OrderStatus::Cancelled.next(), None);
    }
}
