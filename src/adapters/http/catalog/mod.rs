//! Read-only catalog enumerations.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::domain::catalog::{OperationMethod, ProductDefinition, ResourceDefinition, Variety};

/// Catalog routes, relative to `/api`.
pub fn catalog_router() -> Router<AppState> {
    Router::new()
        .route("/catalog/varieties", get(list_varieties))
        .route("/catalog/operation-methods", get(list_operation_methods))
        .route("/catalog/products", get(list_products))
        .route("/catalog/resources", get(list_resources))
}

async fn list_varieties(State(state): State<AppState>) -> Result<Json<Vec<Variety>>, ApiError> {
    let catalog = state.catalog.catalog().await?;
    Ok(Json(catalog.varieties.clone()))
}

async fn list_operation_methods(
    State(state): State<AppState>,
) -> Result<Json<Vec<OperationMethod>>, ApiError> {
    let catalog = state.catalog.catalog().await?;
    Ok(Json(
        catalog
            .operation_methods
            .iter()
            .filter(|m| m.active)
            .cloned()
            .collect(),
    ))
}

async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductDefinition>>, ApiError> {
    let catalog = state.catalog.catalog().await?;
    Ok(Json(catalog.products.clone()))
}

async fn list_resources(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResourceDefinition>>, ApiError> {
    let catalog = state.catalog.catalog().await?;
    Ok(Json(catalog.resources.clone()))
}
