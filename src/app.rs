use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::AuthSettings;
use crate::config::AppConfig;
use crate::database::{CategoryStore, PgCategoryStore, PgProductStore, ProductStore};
use crate::handlers::{admin, public};
use crate::middleware::{jwt_auth_middleware, require_admin};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryStore>,
    pub products: Arc<dyn ProductStore>,
    pub auth: AuthSettings,
    /// Pool used for health reporting; absent when running on a store double
    pub database: Option<PgPool>,
}

impl AppState {
    pub fn postgres(pool: PgPool, auth: AuthSettings) -> Self {
        Self {
            categories: Arc::new(PgCategoryStore::new(pool.clone())),
            products: Arc::new(PgProductStore::new(pool.clone())),
            auth,
            database: Some(pool),
        }
    }
}

/// All catalog routes with state applied. Reads are public, writes go
/// through bearer authentication and the admin gate.
pub fn routes(state: AppState) -> Router {
    let auth = state.auth.clone();

    Router::new()
        .route("/", get(public::service::root))
        .route("/health", get(public::service::health))
        .route(
            "/categories",
            get(public::categories::list).merge(admin_only(post(admin::categories::create), &auth)),
        )
        .route(
            "/categories/:id",
            get(public::categories::get).merge(admin_only(
                put(admin::categories::update).merge(delete(admin::categories::delete)),
                &auth,
            )),
        )
        .route("/categories/:id/products", get(public::categories::products))
        .route(
            "/products",
            get(public::products::search).merge(admin_only(post(admin::products::create), &auth)),
        )
        .route(
            "/products/:id",
            get(public::products::get).merge(admin_only(
                put(admin::products::update).merge(delete(admin::products::delete)),
                &auth,
            )),
        )
        .with_state(state)
}

fn admin_only(method_router: MethodRouter<AppState>, auth: &AuthSettings) -> MethodRouter<AppState> {
    // Last layer added runs first: authenticate, then check the role
    method_router
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware))
}

/// Transport concerns driven by configuration
pub fn with_http_layers(router: Router, config: &AppConfig) -> Router {
    let mut router = router.layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        let origins: Vec<HeaderValue> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}
