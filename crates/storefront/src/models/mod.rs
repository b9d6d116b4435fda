//! Domain models for the storefront.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod session;
pub mod user;

pub use cart::CartItem;
pub use catalog::{Category, Product, ProductVariant};
pub use order::{Order, OrderItem};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
