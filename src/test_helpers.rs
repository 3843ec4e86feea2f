use std::sync::Arc;

use axum::Router;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::app,
    state::AppState,
};

/// State over a fresh, bootstrapped in-memory SQLite database.
pub async fn test_state() -> Arc<AppState> {
    let cfg = AppConfig {
        database: DatabaseConfig::in_memory(),
        ..AppConfig::default()
    };
    let db = connection::connect(&cfg.database)
        .await
        .expect("connect to in-memory database");
    AppState::new(cfg, db)
}

pub fn test_router(state: &Arc<AppState>) -> Router {
    app(Arc::clone(state))
}
