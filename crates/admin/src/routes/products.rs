//! Product management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use greengrocer_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::catalog::{CreateProductInput, UpdateProductInput};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Include deactivated products.
    #[serde(default)]
    pub all: bool,
}

/// List products, optionally including deactivated ones.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<impl IntoResponse> {
    let products = ProductRepository::new(state.pool()).list(query.all).await?;

    Ok(Json(products))
}

/// Fetch a single product.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// Create a product with its variants.
#[instrument(skip(_admin, state, input))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    validate_variants(input.variants.iter().map(|v| v.price))?;

    let product = ProductRepository::new(state.pool()).create(&input).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product. The submitted variant list replaces the stored one.
#[instrument(skip(_admin, state, input))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateProductInput>,
) -> Result<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    validate_variants(input.variants.iter().map(|v| v.price))?;

    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &input)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("product {id}")),
            other => AppError::Database(other),
        })?;

    Ok(Json(product))
}

/// Deactivate a product (soft delete).
#[instrument(skip(_admin, state))]
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    ProductRepository::new(state.pool())
        .deactivate(ProductId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("product {id}")),
            other => AppError::Database(other),
        })?;

    Ok(Json(json!({ "success": true })))
}

/// Variant prices must be positive; the database enforces it too, but a 400
/// beats a constraint violation surfaced as a 500.
fn validate_variants(prices: impl Iterator<Item = i32>) -> Result<()> {
    for price in prices {
        if price <= 0 {
            return Err(AppError::BadRequest(
                "variant price must be positive".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_variants() {
        assert!(validate_variants([30, 55].into_iter()).is_ok());
        assert!(validate_variants([].into_iter()).is_ok());
        assert!(validate_variants([30, 0].into_iter()).is_err());
        assert!(validate_variants([-5].into_iter()).is_err());
    }
}
