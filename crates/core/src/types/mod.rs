//! Core types for Green Grocer.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod policy;
pub mod pricing;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use policy::StockPolicy;
pub use pricing::{DELIVERY_FEE, FREE_DELIVERY_THRESHOLD, delivery_fee, order_total};
pub use status::{InvalidTransition, OrderStatus};
