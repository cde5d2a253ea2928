use axum::extract::{rejection::PathRejection, Path, State};

use crate::app::AppState;
use crate::database::models::{Category, Product};
use crate::handlers::extract::path_id;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /categories - every category, ordered by id
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = state.categories.list_all().await?;
    Ok(ApiResponse::success(categories))
}

/// GET /categories/:id
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Category> {
    let category = state.categories.get_by_id(path_id(id)?).await?;
    Ok(ApiResponse::success(category))
}

/// GET /categories/:id/products - empty list when nothing matches, never 404
pub async fn products(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<Product>> {
    let products = state.products.list_by_category_id(path_id(id)?).await?;
    Ok(ApiResponse::success(products))
}
