use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};

use crate::{
    db::entities::{CategoryId, ListId, category},
    response::{ApiResult, JsonApiResponse},
    services::ServiceContext,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CategoryNameRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryOrderRequest {
    pub ids: Vec<CategoryId>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub display_order: i32,
    pub list_id: ListId,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            display_order: model.display_order,
            list_id: model.list_id,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/lists/{list_id}/categories",
            get(list_categories).post(create_category),
        )
        .route("/categories/order", put(reorder_categories))
        .route(
            "/categories/{category_id}",
            get(get_category)
                .patch(rename_category)
                .delete(delete_category),
        )
        .with_state(state)
}

async fn list_categories(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<ListId>,
) -> ApiResult<Vec<CategoryResponse>> {
    let categories = ServiceContext::from_state(&state)
        .category()
        .all_for_list(list_id)
        .await?;
    JsonApiResponse::ok(categories.into_iter().map(CategoryResponse::from).collect())
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<ListId>,
    Json(body): Json<CategoryNameRequest>,
) -> ApiResult<CategoryResponse> {
    let category = ServiceContext::from_state(&state)
        .category()
        .create(list_id, &body.name)
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", category.into())
}

async fn reorder_categories(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CategoryOrderRequest>,
) -> ApiResult<serde_json::Value> {
    ServiceContext::from_state(&state)
        .category()
        .reorder(&body.ids)
        .await?;
    JsonApiResponse::success()
}

async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<CategoryId>,
) -> ApiResult<CategoryResponse> {
    let category = ServiceContext::from_state(&state)
        .category()
        .require(category_id)
        .await?;
    JsonApiResponse::ok(category.into())
}

async fn rename_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<CategoryId>,
    Json(body): Json<CategoryNameRequest>,
) -> ApiResult<serde_json::Value> {
    ServiceContext::from_state(&state)
        .category()
        .rename(category_id, &body.name)
        .await?;
    JsonApiResponse::success()
}

// Deleting "Other" or an unknown id still answers success.
async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<CategoryId>,
) -> ApiResult<serde_json::Value> {
    ServiceContext::from_state(&state)
        .category()
        .delete(category_id)
        .await?;
    JsonApiResponse::success()
}
