//! Dashboard statistics route handler.

use axum::{Json, extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::StatsRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Return the dashboard aggregate snapshot.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let stats = StatsRepository::new(state.pool()).dashboard().await?;

    Ok(Json(stats))
}
