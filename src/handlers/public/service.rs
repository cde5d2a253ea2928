use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::DatabaseManager;
use crate::error::ApiError;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Catalog API",
            "version": version,
            "description": "Product catalog with categories, products and product search",
            "endpoints": {
                "categories": "/categories[/:id] (public read, admin write)",
                "category_products": "/categories/:id/products (public)",
                "products": "/products[/:id] (public read, admin write)",
                "search": "/products?cat=&minPrice=&maxPrice=&subCategory= (public)",
                "health": "/health (public)",
            }
        }
    }))
}

/// GET /health - database reachability. An unreachable database is a 503
/// through `ApiError`.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let database = match state.database.as_ref() {
        Some(pool) => {
            DatabaseManager::health_check(pool).await?;
            "ok"
        }
        None => "not configured",
    };

    Ok(Json(json!({
        "success": true,
        "data": { "status": "ok", "timestamp": chrono::Utc::now(), "database": database }
    })))
}
