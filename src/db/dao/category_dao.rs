use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, sea_query::Expr,
};

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::{Category, Item};
use crate::db::entities::{CategoryId, ListId, OTHER_CATEGORY_NAME, category, item};

#[derive(Clone)]
pub struct CategoryDao {
    db: DatabaseConnection,
}

impl DaoBase for CategoryDao {
    type Entity = Category;
    const ENTITY_NAME: &'static str = "Category";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// What [`CategoryDao::delete_reassigning`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRemoval {
    /// No category with that id.
    Missing,
    /// The category is the list's "Other" fallback and was left alone.
    Protected,
    /// The row is gone. `fallback_id` is the "Other" sibling that received
    /// `reassigned` items, or `None` when the list had no "Other" category.
    Removed {
        fallback_id: Option<CategoryId>,
        reassigned: u64,
    },
}

impl CategoryDao {
    pub async fn create(&self, list_id: ListId, name: &str) -> DaoResult<category::Model> {
        let txn = self.begin().await?;
        let model = insert_category(&txn, list_id, name).await?;
        txn.commit().await?;
        Ok(model)
    }

    pub async fn all_for_list(&self, list_id: ListId) -> DaoResult<Vec<category::Model>> {
        Ok(Category::find()
            .filter(category::Column::ListId.eq(list_id))
            .order_by_asc(category::Column::DisplayOrder)
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn find_other(&self, list_id: ListId) -> DaoResult<Option<category::Model>> {
        find_other_in(&self.db, list_id).await
    }

    /// Returns `false` without touching storage when `name` is empty.
    pub async fn rename(&self, id: CategoryId, name: &str) -> DaoResult<bool> {
        if name.is_empty() {
            return Ok(false);
        }
        let result = Category::update_many()
            .col_expr(category::Column::Name, Expr::value(name.to_string()))
            .filter(category::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Writes `display_order = index` for each id in order. Unknown ids
    /// match no row and are skipped; list membership is not checked.
    pub async fn reorder(&self, ids: &[CategoryId]) -> DaoResult<u64> {
        let txn = self.begin().await?;
        let mut updated = 0;
        for (index, id) in ids.iter().enumerate() {
            let result = Category::update_many()
                .col_expr(category::Column::DisplayOrder, Expr::value(index as i32))
                .filter(category::Column::Id.eq(*id))
                .exec(&txn)
                .await?;
            updated += result.rows_affected;
        }
        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a category after moving its items to the list's "Other"
    /// category. "Other" itself is never deleted.
    pub async fn delete_reassigning(&self, id: CategoryId) -> DaoResult<CategoryRemoval> {
        let txn = self.begin().await?;

        let Some(target) = Category::find_by_id(id).one(&txn).await? else {
            return Ok(CategoryRemoval::Missing);
        };
        if target.is_other() {
            return Ok(CategoryRemoval::Protected);
        }

        let fallback = find_other_in(&txn, target.list_id).await?;
        let mut reassigned = 0;
        if let Some(fallback) = fallback.as_ref() {
            let result = Item::update_many()
                .col_expr(item::Column::CategoryId, Expr::value(Some(fallback.id)))
                .filter(item::Column::CategoryId.eq(id))
                .exec(&txn)
                .await?;
            reassigned = result.rows_affected;
        }

        Category::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(CategoryRemoval::Removed {
            fallback_id: fallback.map(|model| model.id),
            reassigned,
        })
    }
}

pub(super) async fn insert_category<C: ConnectionTrait>(
    conn: &C,
    list_id: ListId,
    name: &str,
) -> DaoResult<category::Model> {
    let max_order: Option<i32> = Category::find()
        .select_only()
        .column_as(category::Column::DisplayOrder.max(), "max_order")
        .filter(category::Column::ListId.eq(list_id))
        .into_tuple::<Option<i32>>()
        .one(conn)
        .await?
        .flatten();

    let model = category::ActiveModel {
        name: Set(name.to_string()),
        list_id: Set(list_id),
        display_order: Set(max_order.unwrap_or(0) + 1),
        ..Default::default()
    };
    Ok(model.insert(conn).await?)
}

pub(super) async fn find_other_in<C: ConnectionTrait>(
    conn: &C,
    list_id: ListId,
) -> DaoResult<Option<category::Model>> {
    Ok(Category::find()
        .filter(category::Column::ListId.eq(list_id))
        .filter(category::Column::Name.eq(OTHER_CATEGORY_NAME))
        .order_by_asc(category::Column::Id)
        .one(conn)
        .await?)
}
