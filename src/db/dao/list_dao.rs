use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

use super::{DaoBase, DaoResult, category_dao::insert_category};
use crate::db::entities::prelude::ShoppingList;
use crate::db::entities::{ListId, OTHER_CATEGORY_NAME, category, shopping_list};

pub const DEFAULT_LIST_NAME: &str = "Main List";

#[derive(Clone)]
pub struct ListDao {
    db: DatabaseConnection,
}

impl DaoBase for ListDao {
    type Entity = ShoppingList;
    const ENTITY_NAME: &'static str = "Shopping list";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ListDao {
    /// Inserts a list together with its "Other" category.
    pub async fn create_with_other(
        &self,
        name: &str,
    ) -> DaoResult<(shopping_list::Model, category::Model)> {
        let txn = self.begin().await?;
        let list = shopping_list::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let other = insert_category(&txn, list.id, OTHER_CATEGORY_NAME).await?;
        txn.commit().await?;
        Ok((list, other))
    }

    /// Creates "Main List" (with "Other") only when no list exists at all.
    pub async fn create_default(&self) -> DaoResult<Option<shopping_list::Model>> {
        let txn = self.begin().await?;
        if ShoppingList::find().count(&txn).await? > 0 {
            return Ok(None);
        }
        let list = shopping_list::ActiveModel {
            name: Set(DEFAULT_LIST_NAME.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        insert_category(&txn, list.id, OTHER_CATEGORY_NAME).await?;
        txn.commit().await?;
        Ok(Some(list))
    }

    pub async fn all(&self) -> DaoResult<Vec<shopping_list::Model>> {
        Ok(ShoppingList::find()
            .order_by_asc(shopping_list::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Returns `false` without touching storage when `name` is empty.
    pub async fn rename(&self, id: ListId, name: &str) -> DaoResult<bool> {
        if name.is_empty() {
            return Ok(false);
        }
        let result = ShoppingList::update_many()
            .col_expr(shopping_list::Column::Name, Expr::value(name.to_string()))
            .filter(shopping_list::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Hard delete; categories and their items go with the list through
    /// the foreign-key cascade.
    pub async fn delete(&self, id: ListId) -> DaoResult<bool> {
        let result = ShoppingList::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::ListDao;
    use crate::db::dao::DaoBase;
    use crate::db::entities::shopping_list;

    #[tokio::test]
    async fn all_returns_lists_in_storage_order() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([[
                shopping_list::Model {
                    id: 1,
                    name: "Main List".to_string(),
                },
                shopping_list::Model {
                    id: 2,
                    name: "Hardware".to_string(),
                },
            ]])
            .into_connection();
        let dao = ListDao::new(&db);

        let lists = dao.all().await.expect("select should succeed");
        let names: Vec<_> = lists.iter().map(|list| list.name.as_str()).collect();
        assert_eq!(names, ["Main List", "Hardware"]);
    }

    #[tokio::test]
    async fn rename_with_empty_name_skips_storage() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let dao = ListDao::new(&db);

        assert!(!dao.rename(1, "").await.expect("rename should be a no-op"));
    }
}
