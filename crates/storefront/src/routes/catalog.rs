//! Catalog route handlers (public reads).

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use greengrocer_core::{CategoryId, ProductId};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Filter by category ID.
    pub category: Option<i32>,
    /// Case-insensitive name search.
    pub search: Option<String>,
}

/// List active products with variants.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<impl IntoResponse> {
    let catalog = CatalogRepository::new(state.pool());

    let products = catalog
        .list_products(query.category.map(CategoryId::new), query.search.as_deref())
        .await?;

    Ok(Json(products))
}

/// Fetch a single product.
#[instrument(skip(state))]
pub async fn show_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let catalog = CatalogRepository::new(state.pool());

    let product = catalog
        .get_product(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// List all categories.
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let catalog = CatalogRepository::new(state.pool());
    let categories = catalog.list_categories().await?;

    Ok(Json(categories))
}
