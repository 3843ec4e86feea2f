use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use super::registry::{DbProvider, DbProviderId};

/// Tables whose serial `id` can be written explicitly during bootstrap.
const SEEDED_TABLES: [&str; 2] = ["shopping_lists", "categories"];

/// Networked relational engine. Booleans are native.
pub struct PostgresDbProvider;

#[async_trait]
impl DbProvider for PostgresDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::Postgres
    }

    fn schemes(&self) -> &'static [&'static str] {
        &["postgres://", "postgresql://"]
    }

    async fn after_bootstrap(&self, db: &DatabaseConnection) -> Result<()> {
        // Inserting id 1 by hand does not advance the sequence; without this
        // the first user-created list or category would collide with it.
        for table in SEEDED_TABLES {
            db.execute_unprepared(&format!(
                "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
                 COALESCE((SELECT MAX(id) FROM {table}), 1))"
            ))
            .await?;
        }
        Ok(())
    }
}
