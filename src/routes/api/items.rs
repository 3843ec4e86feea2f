use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post, put},
};
use serde::{Deserialize, Serialize};

use crate::{
    db::dao::ItemWithCategory,
    db::entities::{CategoryId, ItemId, ListId, item},
    response::{ApiResult, JsonApiResponse},
    services::{ServiceContext, item_service::ItemInput},
    state::AppState,
};

/// Completion flag as clients send it: a JSON boolean or a 0/1 style
/// integer, where any non-zero value means completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CompletedFlag {
    Bool(bool),
    Int(i64),
}

impl CompletedFlag {
    pub fn is_set(self) -> bool {
        match self {
            Self::Bool(value) => value,
            Self::Int(value) => value != 0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemRequest {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub notes: Option<String>,
    pub who_needs_it: Option<String>,
    pub who_will_buy_it: Option<String>,
    pub category_id: Option<CategoryId>,
    pub is_completed: Option<CompletedFlag>,
}

impl From<ItemRequest> for ItemInput {
    fn from(body: ItemRequest) -> Self {
        Self {
            name: body.name,
            quantity: body.quantity,
            notes: body.notes,
            who_needs_it: body.who_needs_it,
            who_will_buy_it: body.who_will_buy_it,
            category_id: body.category_id,
            is_completed: body.is_completed.map(CompletedFlag::is_set),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ItemNameRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletedRequest {
    pub is_completed: CompletedFlag,
}

#[derive(Debug, Deserialize)]
pub struct ItemOrderRequest {
    pub item_id: ItemId,
    pub new_category_id: CategoryId,
    #[serde(default)]
    pub sibling_ids: Vec<ItemId>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub name: String,
    pub quantity: i32,
    pub notes: Option<String>,
    pub who_needs_it: Option<String>,
    pub who_will_buy_it: Option<String>,
    pub is_completed: bool,
    pub is_deleted: bool,
    pub category_id: Option<CategoryId>,
    pub display_order: i32,
}

impl From<item::Model> for ItemResponse {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            quantity: model.quantity,
            notes: model.notes,
            who_needs_it: model.who_needs_it,
            who_will_buy_it: model.who_will_buy_it,
            is_completed: model.is_completed,
            is_deleted: model.is_deleted,
            category_id: model.category_id,
            display_order: model.display_order,
        }
    }
}

/// An item of a list listing, carrying the name of its category.
#[derive(Debug, Serialize)]
pub struct ListedItemResponse {
    #[serde(flatten)]
    pub item: ItemResponse,
    pub category_name: String,
}

impl From<ItemWithCategory> for ListedItemResponse {
    fn from(entry: ItemWithCategory) -> Self {
        Self {
            item: entry.item.into(),
            category_name: entry.category_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub cleared: u64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lists/{list_id}/items", get(list_items).post(create_item))
        .route(
            "/lists/{list_id}/items/clear-completed",
            post(clear_completed),
        )
        .route("/items/order", put(reorder_and_reassign))
        .route(
            "/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/items/{item_id}/name", patch(rename_item))
        .route("/items/{item_id}/completed", patch(set_completed))
        .with_state(state)
}

async fn list_items(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<ListId>,
) -> ApiResult<Vec<ListedItemResponse>> {
    let items = ServiceContext::from_state(&state)
        .item()
        .all_for_list(list_id)
        .await?;
    JsonApiResponse::ok(items.into_iter().map(ListedItemResponse::from).collect())
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<ListId>,
    Json(body): Json<ItemRequest>,
) -> ApiResult<ItemResponse> {
    let item = ServiceContext::from_state(&state)
        .item()
        .create(list_id, body.into())
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", item.into())
}

async fn clear_completed(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<ListId>,
) -> ApiResult<ClearedResponse> {
    let cleared = ServiceContext::from_state(&state)
        .item()
        .clear_completed(list_id)
        .await?;
    JsonApiResponse::ok(ClearedResponse { cleared })
}

async fn reorder_and_reassign(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ItemOrderRequest>,
) -> ApiResult<serde_json::Value> {
    ServiceContext::from_state(&state)
        .item()
        .reorder_and_reassign(body.item_id, body.new_category_id, &body.sibling_ids)
        .await?;
    JsonApiResponse::success()
}

async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<ItemId>,
) -> ApiResult<ItemResponse> {
    let item = ServiceContext::from_state(&state)
        .item()
        .require(item_id)
        .await?;
    JsonApiResponse::ok(item.into())
}

async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<ItemId>,
    Json(body): Json<ItemRequest>,
) -> ApiResult<serde_json::Value> {
    ServiceContext::from_state(&state)
        .item()
        .update(item_id, body.into())
        .await?;
    JsonApiResponse::success()
}

async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<ItemId>,
) -> ApiResult<serde_json::Value> {
    ServiceContext::from_state(&state)
        .item()
        .delete(item_id)
        .await?;
    JsonApiResponse::success()
}

async fn rename_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<ItemId>,
    Json(body): Json<ItemNameRequest>,
) -> ApiResult<serde_json::Value> {
    ServiceContext::from_state(&state)
        .item()
        .rename(item_id, &body.name)
        .await?;
    JsonApiResponse::success()
}

async fn set_completed(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<ItemId>,
    Json(body): Json<CompletedRequest>,
) -> ApiResult<serde_json::Value> {
    ServiceContext::from_state(&state)
        .item()
        .set_completed(item_id, body.is_completed.is_set())
        .await?;
    JsonApiResponse::success()
}
