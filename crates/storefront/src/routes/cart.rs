//! Cart route handlers.
//!
//! The cart never touches stock - variants are only checked and decremented
//! at checkout.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use greengrocer_core::VariantId;

use crate::db::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::cart::{CartItem, subtotal};
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    pub variant_id: i32,
    pub quantity: Option<i32>,
}

/// Update-quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartInput {
    pub variant_id: i32,
    pub quantity: i32,
}

/// Remove-line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartInput {
    pub variant_id: i32,
}

/// Cart payload: lines plus the running subtotal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub subtotal: i64,
}

/// Show the customer's cart.
#[instrument(skip(user, state))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let cart = CartRepository::new(state.pool());
    let items = cart.list(user.id).await?;
    let subtotal = subtotal(&items);

    Ok(Json(CartView { items, subtotal }))
}

/// Add a variant to the cart.
#[instrument(skip(user, state))]
pub async fn add(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<AddToCartInput>,
) -> Result<impl IntoResponse> {
    let quantity = input.quantity.unwrap_or(1);
    if quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be positive".to_string()));
    }

    let cart = CartRepository::new(state.pool());
    let item = cart
        .add(user.id, VariantId::new(input.variant_id), quantity)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound(format!("variant {}", input.variant_id))
            }
            other => AppError::Database(other),
        })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Set a cart line's quantity.
#[instrument(skip(user, state))]
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpdateCartInput>,
) -> Result<impl IntoResponse> {
    let cart = CartRepository::new(state.pool());
    cart.set_quantity(user.id, VariantId::new(input.variant_id), input.quantity)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a cart line.
#[instrument(skip(user, state))]
pub async fn remove(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<RemoveFromCartInput>,
) -> Result<impl IntoResponse> {
    let cart = CartRepository::new(state.pool());
    cart.remove(user.id, VariantId::new(input.variant_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
