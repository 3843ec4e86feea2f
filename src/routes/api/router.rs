use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{board, categories, items, lists, public};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router())
        .merge(lists::router(state.clone()))
        .merge(board::router(state.clone()))
        .merge(categories::router(state.clone()))
        .merge(items::router(state))
}
