//! Authentication route handlers for the customer realm.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Minimal account payload returned after registration.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: greengrocer_core::UserId,
    pub name: String,
    pub email: String,
}

/// Register a new customer account.
#[instrument(skip(state, input))]
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());

    let user = auth
        .register(
            &input.name,
            &input.email,
            &input.password,
            input.phone.as_deref(),
            input.address.as_deref(),
        )
        .await?;

    tracing::info!(user_id = %user.id, "customer registered");

    let body = RegisteredUser {
        id: user.id,
        name: user.name,
        email: user.email.into_inner(),
    };

    Ok((StatusCode::CREATED, Json(body)))
}

/// Login and establish a customer session.
#[instrument(skip(state, session, input))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&input.email, &input.password).await?;

    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
    };
    set_current_user(&session, &current).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(Json(current))
}

/// Logout and clear the customer session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_user(&session).await?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}
