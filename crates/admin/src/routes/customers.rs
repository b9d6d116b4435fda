//! Customer route handlers.

use axum::{Json, extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::CustomerRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// List all customers with their order summaries.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let customers = CustomerRepository::new(state.pool()).list().await?;

    Ok(Json(customers))
}
