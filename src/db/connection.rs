use sea_orm::DatabaseConnection;
use tracing::info;

use super::{bootstrap, providers};
use crate::config::DatabaseConfig;

/// Opens the pool for the engine named by the URL scheme, syncs the schema
/// and makes sure the seed rows exist.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let registry = providers::default_registry()?;
    let provider = registry.provider_for_url(&cfg.url)?;
    info!(provider = provider.id().as_str(), "connecting to database");

    let db = provider.connect(cfg).await?;

    info!("syncing database schema from entities");
    db.get_schema_registry("shopping_list::db::entities::*")
        .sync(&db)
        .await?;

    let seeded = bootstrap::ensure_seed_rows(&db).await?;
    if seeded.any() {
        info!(
            list = seeded.list,
            category = seeded.category,
            "seeded default shopping list"
        );
    }
    provider.after_bootstrap(&db).await?;

    Ok(db)
}
