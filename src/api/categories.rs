use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::dto::{CreateCategory, UpdateCategory};
use crate::entities::category;
use crate::error::ApiResult;

pub fn category_router() -> Router {
    Router::new()
        .route(
            "/categories",
            post(create_category)
                .patch(update_category)
                .get(list_categories),
        )
        .route("/categories/:id", get(get_category).delete(delete_category))
}

async fn create_category(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CreateCategory>,
) -> ApiResult<(StatusCode, Json<category::Model>)> {
    let created = state.categories.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_category(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<UpdateCategory>,
) -> ApiResult<Json<category::Model>> {
    Ok(Json(state.categories.update(payload).await?))
}

async fn list_categories(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Json<Vec<category::Model>>> {
    Ok(Json(state.categories.list().await?))
}

async fn get_category(
    Path(id): Path<i32>,
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Json<category::Model>> {
    Ok(Json(state.categories.get_by_id(id).await?))
}

async fn delete_category(
    Path(id): Path<i32>,
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
