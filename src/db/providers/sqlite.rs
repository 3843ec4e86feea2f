use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};

use super::registry::{DbProvider, DbProviderId, pool_options};
use crate::config::DatabaseConfig;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Embedded single-file engine. Booleans are stored as 0/1.
pub struct SqliteDbProvider;

#[async_trait]
impl DbProvider for SqliteDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::Sqlite
    }

    fn schemes(&self) -> &'static [&'static str] {
        &["sqlite:"]
    }

    /// Foreign keys and the busy timeout are connection options, so every
    /// pooled connection carries them.
    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut options = pool_options(cfg);
        options.map_sqlx_sqlite_opts(|opts| opts.foreign_keys(true).busy_timeout(BUSY_TIMEOUT));
        Ok(Database::connect(options).await?)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveModelTrait, Set};

    use crate::config::DatabaseConfig;
    use crate::db::connection;
    use crate::db::entities::item;

    #[tokio::test]
    async fn rejects_items_pointing_at_missing_categories() {
        let db = connection::connect(&DatabaseConfig::in_memory())
            .await
            .expect("connect");

        let result = item::ActiveModel {
            name: Set("Stray".to_string()),
            quantity: Set(1),
            category_id: Set(Some(4242)),
            display_order: Set(1),
            is_deleted: Set(false),
            is_completed: Set(false),
            ..Default::default()
        }
        .insert(&db)
        .await;

        assert!(result.is_err(), "foreign keys should be enforced");
    }
}
