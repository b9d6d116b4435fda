//! Profile route handlers.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Profile update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileInput {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Show the logged-in customer's account details.
#[instrument(skip(user, state))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let users = UserRepository::new(state.pool());

    let profile = users
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("account".to_string()))?;

    Ok(Json(profile))
}

/// Update the logged-in customer's profile.
#[instrument(skip(user, state, input))]
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileInput>,
) -> Result<impl IntoResponse> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let users = UserRepository::new(state.pool());
    let profile = users
        .update_profile(
            user.id,
            name,
            input.phone.as_deref(),
            input.address.as_deref(),
        )
        .await?;

    Ok(Json(profile))
}
