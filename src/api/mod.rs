pub mod categories;
pub mod products;

use axum::{extract::Extension, middleware, Router};
use std::sync::Arc;

use crate::middleware::logging::logging_middleware;
use crate::services::{CategoryService, ProductService};

pub struct AppState {
    pub categories: CategoryService,
    pub products: ProductService,
}

pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(categories::category_router())
        .merge(products::product_router())
        .layer(Extension(state))
        .layer(middleware::from_fn(logging_middleware))
}
