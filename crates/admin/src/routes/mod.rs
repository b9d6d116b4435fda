//! HTTP route handlers for the admin JSON API.
//!
//! Every route except `/auth/*` requires an admin session. The update-order
//! surface is deliberately three distinct operations (set-status, set-item
//! -checked, and the storefront's cancel) rather than one polymorphic
//! endpoint dispatching on payload shape.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database ping)
//!
//! # Auth (admin realm, `admin_session` cookie)
//! POST /auth/login                    - Login, sets the session cookie
//! POST /auth/logout                   - Logout, clears the session
//!
//! # Products
//! GET    /products                    - All products (?all=true includes inactive)
//! POST   /products                    - Create product with variants
//! GET    /products/{id}               - Product detail
//! PUT    /products/{id}               - Update product, replacing variants
//! DELETE /products/{id}               - Deactivate (soft delete)
//!
//! # Categories
//! GET  /categories                    - Category list
//! POST /categories                    - Create category
//!
//! # Orders
//! GET  /orders                        - All orders with customer identity
//! GET  /orders/{id}                   - One order
//! PUT  /orders/{id}/status            - Forward status transition
//! PUT  /orders/{id}/items/{item_id}   - Toggle packing-check flag
//!
//! # Customers
//! GET  /customers                     - Customers with order summaries
//!
//! # Stats
//! GET  /stats                         - Dashboard aggregate snapshot
//! ```

pub mod auth;
pub mod categories;
pub mod customers;
pub mod orders;
pub mod products;
pub mod stats;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", put(orders::set_status))
        .route("/{id}/items/{item_id}", put(orders::set_item_checked))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .nest("/orders", order_routes())
        .route("/customers", get(customers::list))
        .route("/stats", get(stats::show))
        .nest("/auth", auth_routes())
}
