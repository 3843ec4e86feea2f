use sea_orm::{
    DatabaseConnection, DatabaseTransaction, EntityTrait, PrimaryKeyTrait, TransactionTrait,
};

use super::error::{DaoLayerError, DaoResult};

/// Shared plumbing for the per-table DAOs.
///
/// Every DAO owns a clone of the pooled connection. Single statements run
/// directly against the pool; multi-statement protocols open a transaction
/// with [`DaoBase::begin`] and commit it at the end. A transaction that is
/// dropped before `commit` rolls back, so early returns and `?` never leave
/// half-applied writes behind.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model: Send + Sync,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<i32> + Send + Sync,
{
    type Entity: EntityTrait + Send + Sync;
    const ENTITY_NAME: &'static str;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    async fn begin(&self) -> DaoResult<DatabaseTransaction> {
        Ok(self.db().begin().await?)
    }

    async fn find_optional(
        &self,
        id: i32,
    ) -> DaoResult<Option<<Self::Entity as EntityTrait>::Model>> {
        Ok(Self::Entity::find_by_id(id).one(self.db()).await?)
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        self.find_optional(id)
            .await?
            .ok_or(DaoLayerError::NotFound {
                entity: Self::ENTITY_NAME,
                id,
            })
    }
}
