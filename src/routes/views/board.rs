use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::Local;

use crate::{
    db::entities::{CategoryId, ItemId, ListId, item, shopping_list},
    routes::{
        API_PREFIX,
        extract::{ActiveListCookie, active_list_cookie},
    },
    services::{ServiceContext, board::Board},
    state::AppState,
};

#[derive(Template)]
#[template(path = "board.html")]
struct BoardTemplate {
    api_prefix: &'static str,
    rendered_at: String,
    active_list_id: ListId,
    active_list_name: String,
    item_count: usize,
    lists: Vec<ListOption>,
    categories: Vec<CategoryView>,
}

struct ListOption {
    id: ListId,
    name: String,
    selected: bool,
}

struct CategoryView {
    id: CategoryId,
    name: String,
    is_other: bool,
    items: Vec<ItemView>,
}

/// Optional text fields are empty strings so the edit dialog can prefill
/// them from `data-` attributes.
struct ItemView {
    id: ItemId,
    name: String,
    quantity: i32,
    notes: String,
    who_needs_it: String,
    who_will_buy_it: String,
    details: String,
    is_completed: bool,
}

impl From<item::Model> for ItemView {
    fn from(model: item::Model) -> Self {
        let notes = model.notes.unwrap_or_default();
        let who_needs_it = model.who_needs_it.unwrap_or_default();
        let who_will_buy_it = model.who_will_buy_it.unwrap_or_default();
        let details = [
            (!notes.trim().is_empty()).then(|| notes.clone()),
            (!who_needs_it.trim().is_empty()).then(|| format!("for {who_needs_it}")),
            (!who_will_buy_it.trim().is_empty()).then(|| format!("buyer: {who_will_buy_it}")),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
        Self {
            id: model.id,
            name: model.name,
            quantity: model.quantity,
            notes,
            who_needs_it,
            who_will_buy_it,
            details,
            is_completed: model.is_completed,
        }
    }
}

type HtmlError = (StatusCode, Html<String>);

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(board_page)).with_state(state)
}

async fn board_page(
    State(state): State<Arc<AppState>>,
    ActiveListCookie(requested): ActiveListCookie,
) -> Result<impl IntoResponse, HtmlError> {
    let services = ServiceContext::from_state(&state);
    let list = services
        .list()
        .resolve_active(requested)
        .await
        .map_err(|_| html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to load lists"))?;
    let lists = services
        .list()
        .all()
        .await
        .map_err(|_| html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to load lists"))?;
    let cookie = active_list_cookie(list.id)
        .map_err(|_| html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to set active list"))?;
    let board = services
        .board()
        .load(list)
        .await
        .map_err(|_| html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to load board"))?;

    let rendered = board_template(board, lists)
        .render()
        .map_err(|_| html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to render board"))?;
    Ok(([(header::SET_COOKIE, cookie)], Html(rendered)))
}

fn board_template(
    board: Board,
    lists: Vec<shopping_list::Model>,
) -> BoardTemplate {
    let item_count = board.item_count();
    let active_list_id = board.list.id;
    let lists = lists
        .into_iter()
        .map(|list| ListOption {
            selected: list.id == active_list_id,
            id: list.id,
            name: list.name,
        })
        .collect();
    let categories = board
        .groups
        .into_iter()
        .map(|group| CategoryView {
            is_other: group.category.is_other(),
            id: group.category.id,
            name: group.category.name,
            items: group.items.into_iter().map(ItemView::from).collect(),
        })
        .collect();

    BoardTemplate {
        api_prefix: API_PREFIX,
        rendered_at: Local::now().to_rfc3339(),
        active_list_id,
        active_list_name: board.list.name,
        item_count,
        lists,
        categories,
    }
}

fn html_error(status: StatusCode, message: &'static str) -> HtmlError {
    (status, Html(message.to_string()))
}
