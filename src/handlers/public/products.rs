use axum::extract::{
    rejection::{PathRejection, QueryRejection},
    Path, Query, State,
};

use crate::app::AppState;
use crate::database::models::Product;
use crate::filter::ProductFilter;
use crate::handlers::extract::{path_id, query_params};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /products?cat=&minPrice=&maxPrice=&subCategory=
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<ProductFilter>, QueryRejection>,
) -> ApiResult<Vec<Product>> {
    let filter = query_params(query)?;
    let products = state.products.search(&filter).await?;
    Ok(ApiResponse::success(products))
}

/// GET /products/:id
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Product> {
    let product = state.products.get_by_id(path_id(id)?).await?;
    Ok(ApiResponse::success(product))
}
