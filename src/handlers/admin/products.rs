use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Json, Path, State,
};
use tracing::info;

use crate::app::AppState;
use crate::database::models::{Product, ProductInput};
use crate::error::ApiError;
use crate::handlers::extract::{json_body, path_id};
use crate::middleware::{ApiResponse, ApiResult};

fn validated(body: Result<Json<ProductInput>, JsonRejection>) -> Result<ProductInput, ApiError> {
    let input = json_body(body)?;
    input
        .validate()
        .map_err(|fields| ApiError::validation_error("Invalid product", Some(fields)))?;
    Ok(input)
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Product> {
    let input = validated(body)?;
    let product = state.products.create(&input).await?;
    info!("Product {} created", product.product_id);
    Ok(ApiResponse::created(product))
}

/// PUT /products/:id
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Product> {
    let id = path_id(id)?;
    let input = validated(body)?;
    let product = state.products.update(id, &input).await?;
    info!("Product {} updated", id);
    Ok(ApiResponse::success(product))
}

/// DELETE /products/:id
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<()> {
    let id = path_id(id)?;
    state.products.delete(id).await?;
    info!("Product {} deleted", id);
    Ok(ApiResponse::no_content())
}
