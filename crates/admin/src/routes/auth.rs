//! Authentication route handlers for the admin realm.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login and establish an admin session.
#[instrument(skip(state, session, input))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let admin = auth.login(&input.email, &input.password).await?;

    let current = CurrentAdmin {
        id: admin.id,
        email: admin.email.clone(),
        name: admin.name.clone(),
    };
    set_current_admin(&session, &current).await?;
    set_sentry_user(admin.id.as_i32(), Some(admin.email.as_str()));

    tracing::info!(admin_id = %admin.id, "admin logged in");

    Ok(Json(current))
}

/// Logout and clear the admin session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_admin(&session).await?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}
