//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Auth (customer realm, `user_session` cookie)
//! POST /auth/register          - Create a customer account
//! POST /auth/login             - Login, sets the session cookie
//! POST /auth/logout            - Logout, clears the session
//!
//! # Catalog (public)
//! GET  /products               - Active products (?category=&search=)
//! GET  /products/{id}          - Product detail
//! GET  /categories             - Category list
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart lines with subtotal
//! POST /cart/add               - Add a variant (merges quantity)
//! POST /cart/update            - Set a line's quantity (<= 0 removes)
//! POST /cart/remove            - Remove a line
//!
//! # Orders (requires auth)
//! POST /orders                 - Place an order from the cart
//! GET  /orders                 - Own orders, newest first
//! GET  /orders/{id}            - One own order
//! PUT  /orders/{id}/cancel     - Cancel while still PLACED
//!
//! # Profile (requires auth)
//! GET  /profile                - Account details
//! PUT  /profile                - Update name/phone/address
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod profile;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::list))
        .route("/{id}", get(orders::show))
        .route("/{id}/cancel", put(orders::cancel))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog (public)
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::show_product))
        .route("/categories", get(catalog::list_categories))
        // Cart
        .nest("/cart", cart_routes())
        // Orders
        .nest("/orders", order_routes())
        // Profile
        .route("/profile", get(profile::show).put(profile::update))
        // Auth
        .nest("/auth", auth_routes())
}
