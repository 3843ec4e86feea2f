use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};

use crate::{
    db::entities::{ListId, shopping_list},
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::extract::{ActiveListCookie, active_list_cookie},
    services::ServiceContext,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListNameRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub id: ListId,
    pub name: String,
}

impl From<shopping_list::Model> for ListResponse {
    fn from(model: shopping_list::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route(
            "/lists/{list_id}",
            get(get_list).patch(rename_list).delete(delete_list),
        )
        .route("/active-list", get(get_active_list))
        .route("/active-list/{list_id}", put(set_active_list))
        .with_state(state)
}

async fn list_lists(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ListResponse>> {
    let lists = ServiceContext::from_state(&state).list().all().await?;
    JsonApiResponse::ok(lists.into_iter().map(ListResponse::from).collect())
}

async fn create_list(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ListNameRequest>,
) -> ApiResult<ListResponse> {
    let list = ServiceContext::from_state(&state)
        .list()
        .create(&body.name)
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", list.into())
}

async fn get_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<ListId>,
) -> ApiResult<ListResponse> {
    let list = ServiceContext::from_state(&state)
        .list()
        .require(list_id)
        .await?;
    JsonApiResponse::ok(list.into())
}

async fn rename_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<ListId>,
    Json(body): Json<ListNameRequest>,
) -> ApiResult<serde_json::Value> {
    ServiceContext::from_state(&state)
        .list()
        .rename(list_id, &body.name)
        .await?;
    JsonApiResponse::success()
}

async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<ListId>,
) -> ApiResult<serde_json::Value> {
    ServiceContext::from_state(&state)
        .list()
        .delete(list_id)
        .await?;
    JsonApiResponse::success()
}

async fn get_active_list(
    State(state): State<Arc<AppState>>,
    ActiveListCookie(requested): ActiveListCookie,
) -> Result<impl IntoResponse, AppError> {
    let list = ServiceContext::from_state(&state)
        .list()
        .resolve_active(requested)
        .await?;
    let cookie = active_list_cookie(list.id)?;
    let body = JsonApiResponse::ok(ListResponse::from(list))?;
    Ok(([(header::SET_COOKIE, cookie)], body))
}

async fn set_active_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<ListId>,
) -> Result<impl IntoResponse, AppError> {
    let list = ServiceContext::from_state(&state)
        .list()
        .require(list_id)
        .await?;
    let cookie = active_list_cookie(list.id)?;
    let body = JsonApiResponse::ok(ListResponse::from(list))?;
    Ok(([(header::SET_COOKIE, cookie)], body))
}
