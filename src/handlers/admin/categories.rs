use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Json, Path, State,
};
use tracing::info;

use crate::app::AppState;
use crate::database::models::{Category, CategoryInput};
use crate::error::ApiError;
use crate::handlers::extract::{json_body, path_id};
use crate::middleware::{ApiResponse, ApiResult};

fn validated(body: Result<Json<CategoryInput>, JsonRejection>) -> Result<CategoryInput, ApiError> {
    let input = json_body(body)?;
    input
        .validate()
        .map_err(|fields| ApiError::validation_error("Invalid category", Some(fields)))?;
    Ok(input)
}

/// POST /categories - 201 with the store-assigned id
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Category> {
    let input = validated(body)?;
    let category = state.categories.create(&input).await?;
    info!("Category {} created", category.category_id);
    Ok(ApiResponse::created(category))
}

/// PUT /categories/:id - the path id wins over anything in the body
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Category> {
    let id = path_id(id)?;
    let input = validated(body)?;
    let category = state.categories.update(id, &input).await?;
    info!("Category {} updated", id);
    Ok(ApiResponse::success(category))
}

/// DELETE /categories/:id - 204
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<()> {
    let id = path_id(id)?;
    state.categories.delete(id).await?;
    info!("Category {} deleted", id);
    Ok(ApiResponse::no_content())
}
