//! Order route handlers for the back office.
//!
//! Two mutation operations, each explicit: a forward status step and the
//! per-item packing check. Cancellation is not reachable from here.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use greengrocer_core::{OrderId, OrderItemId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Status-change request body.
#[derive(Debug, Deserialize)]
pub struct SetStatusInput {
    pub status: OrderStatus,
}

/// Packing-check request body.
#[derive(Debug, Deserialize)]
pub struct SetCheckedInput {
    pub checked: bool,
}

/// List all orders with items and customer identity.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;

    Ok(Json(orders))
}

/// Fetch one order.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let order = OrderRepository::new(state.pool())
        .get(OrderId::new(id))
        .await?;

    Ok(Json(order))
}

/// Move an order forward through the fulfilment pipeline.
#[instrument(skip(_admin, state))]
pub async fn set_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<SetStatusInput>,
) -> Result<impl IntoResponse> {
    let order = OrderRepository::new(state.pool())
        .set_status(OrderId::new(id), input.status)
        .await?;

    Ok(Json(order))
}

/// Toggle an order item's packing-verification flag.
#[instrument(skip(_admin, state))]
pub async fn set_item_checked(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path((id, item_id)): Path<(i32, i32)>,
    Json(input): Json<SetCheckedInput>,
) -> Result<impl IntoResponse> {
    let item = OrderRepository::new(state.pool())
        .set_item_checked(OrderId::new(id), OrderItemId::new(item_id), input.checked)
        .await?;

    Ok(Json(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_status_input_wire_format() {
        let input: SetStatusInput =
            serde_json::from_str(r#"{"status":"DISPATCHED"}"#).expect("parse");
        assert_eq!(input.status, OrderStatus::Dispatched);

        // Statuses travel in SCREAMING_SNAKE_CASE only.
        assert!(serde_json::from_str::<SetStatusInput>(r#"{"status":"dispatched"}"#).is_err());
    }

    #[test]
    fn test_set_checked_input_wire_format() {
        let input: SetCheckedInput = serde_json::from_str(r#"{"checked":true}"#).expect("parse");
        assert!(input.checked);
    }
}
