use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;

use crate::{
    db::entities::CategoryId,
    error::AppError,
    response::JsonApiResponse,
    routes::extract::{ActiveListCookie, active_list_cookie},
    services::{ServiceContext, board::Board},
    state::AppState,
};

use super::{items::ItemResponse, lists::ListResponse};

#[derive(Debug, Serialize)]
pub struct BoardCategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub display_order: i32,
    pub items: Vec<ItemResponse>,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub list: ListResponse,
    pub lists: Vec<ListResponse>,
    pub categories: Vec<BoardCategoryResponse>,
}

impl BoardResponse {
    fn new(board: Board, lists: Vec<ListResponse>) -> Self {
        let categories = board
            .groups
            .into_iter()
            .map(|group| BoardCategoryResponse {
                id: group.category.id,
                name: group.category.name,
                display_order: group.category.display_order,
                items: group.items.into_iter().map(ItemResponse::from).collect(),
            })
            .collect();
        Self {
            list: board.list.into(),
            lists,
            categories,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/board", get(get_board))
        .with_state(state)
}

async fn get_board(
    State(state): State<Arc<AppState>>,
    ActiveListCookie(requested): ActiveListCookie,
) -> Result<impl IntoResponse, AppError> {
    let services = ServiceContext::from_state(&state);
    let list = services.list().resolve_active(requested).await?;
    let lists = services.list().all().await?;
    let cookie = active_list_cookie(list.id)?;
    let board = services.board().load(list).await?;

    let body = JsonApiResponse::ok(BoardResponse::new(
        board,
        lists.into_iter().map(ListResponse::from).collect(),
    ))?;
    Ok(([(header::SET_COOKIE, cookie)], body))
}
