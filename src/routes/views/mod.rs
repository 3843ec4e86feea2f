use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod board;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().merge(board::router(state))
}
