//! Order route handlers: placement, history, cancellation.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use greengrocer_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Checkout request body.
///
/// Only the delivery details come from the client; the item list and all
/// amounts come from the customer's persisted cart.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderInput {
    pub address: String,
    pub phone: String,
}

/// Place an order from the customer's cart.
#[instrument(skip(user, state, input))]
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<PlaceOrderInput>,
) -> Result<impl IntoResponse> {
    let address = input.address.trim();
    let phone = input.phone.trim();
    if address.is_empty() {
        return Err(AppError::BadRequest("address is required".to_string()));
    }
    if phone.is_empty() {
        return Err(AppError::BadRequest("phone is required".to_string()));
    }

    let orders = OrderRepository::new(state.pool());
    let order = orders
        .place(user.id, address, phone, state.config().stock_policy)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the customer's own orders.
#[instrument(skip(user, state))]
pub async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool());
    let list = orders.list_for_user(user.id).await?;

    Ok(Json(list))
}

/// Fetch one of the customer's own orders.
#[instrument(skip(user, state))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool());
    let order = orders.get_for_user(OrderId::new(id), user.id).await?;

    Ok(Json(order))
}

/// Cancel one of the customer's own orders while it is still PLACED.
#[instrument(skip(user, state))]
pub async fn cancel(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool());
    let order = orders.cancel(OrderId::new(id), user.id).await?;

    Ok(Json(order))
}
