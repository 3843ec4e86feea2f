use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, sea_query::Expr,
};

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::{Category, Item};
use crate::db::entities::{CategoryId, ItemId, ListId, category, item};

#[derive(Clone)]
pub struct ItemDao {
    db: DatabaseConnection,
}

impl DaoBase for ItemDao {
    type Entity = Item;
    const ENTITY_NAME: &'static str = "Item";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// The writable columns of an item. Used both for inserts and for the
/// full-row overwrite, where `None` is stored as NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub name: String,
    pub quantity: i32,
    pub notes: Option<String>,
    pub who_needs_it: Option<String>,
    pub who_will_buy_it: Option<String>,
    pub category_id: Option<CategoryId>,
    pub is_completed: bool,
}

/// A live item joined with the category it currently sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemWithCategory {
    pub item: item::Model,
    pub category_id: CategoryId,
    pub category_name: String,
}

impl ItemDao {
    pub async fn create(&self, fields: ItemFields) -> DaoResult<item::Model> {
        let txn = self.begin().await?;
        let display_order = next_display_order(&txn, fields.category_id).await?;
        let model = item::ActiveModel {
            name: Set(fields.name),
            quantity: Set(fields.quantity),
            notes: Set(fields.notes),
            who_needs_it: Set(fields.who_needs_it),
            who_will_buy_it: Set(fields.who_will_buy_it),
            category_id: Set(fields.category_id),
            is_completed: Set(fields.is_completed),
            is_deleted: Set(false),
            display_order: Set(display_order),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        Ok(model)
    }

    /// Non-deleted items of a list, ordered by category then item order.
    /// Items whose category no longer exists are not returned.
    pub async fn all_for_list(&self, list_id: ListId) -> DaoResult<Vec<ItemWithCategory>> {
        let rows = Item::find()
            .find_also_related(Category)
            .filter(item::Column::IsDeleted.eq(false))
            .filter(category::Column::ListId.eq(list_id))
            .order_by_asc(category::Column::DisplayOrder)
            .order_by_asc(item::Column::DisplayOrder)
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(item, category)| {
                category.map(|category| ItemWithCategory {
                    item,
                    category_id: category.id,
                    category_name: category.name,
                })
            })
            .collect())
    }

    /// Overwrites every writable column. `display_order` and `is_deleted`
    /// are kept.
    pub async fn overwrite(&self, id: ItemId, fields: ItemFields) -> DaoResult<bool> {
        let result = Item::update_many()
            .col_expr(item::Column::Name, Expr::value(fields.name))
            .col_expr(item::Column::Quantity, Expr::value(fields.quantity))
            .col_expr(item::Column::Notes, Expr::value(fields.notes))
            .col_expr(item::Column::WhoNeedsIt, Expr::value(fields.who_needs_it))
            .col_expr(item::Column::WhoWillBuyIt, Expr::value(fields.who_will_buy_it))
            .col_expr(item::Column::CategoryId, Expr::value(fields.category_id))
            .col_expr(item::Column::IsCompleted, Expr::value(fields.is_completed))
            .filter(item::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn rename(&self, id: ItemId, name: &str) -> DaoResult<bool> {
        let result = Item::update_many()
            .col_expr(item::Column::Name, Expr::value(name.to_string()))
            .filter(item::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn set_completed(&self, id: ItemId, is_completed: bool) -> DaoResult<bool> {
        let result = Item::update_many()
            .col_expr(item::Column::IsCompleted, Expr::value(is_completed))
            .filter(item::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Soft-deletes every completed item whose category belongs to the list.
    pub async fn clear_completed(&self, list_id: ListId) -> DaoResult<u64> {
        let list_categories = Category::find()
            .select_only()
            .column(category::Column::Id)
            .filter(category::Column::ListId.eq(list_id))
            .into_query();

        let result = Item::update_many()
            .col_expr(item::Column::IsDeleted, Expr::value(true))
            .filter(item::Column::IsCompleted.eq(true))
            .filter(item::Column::CategoryId.in_subquery(list_categories))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Moves `item_id` into `new_category_id`, then writes
    /// `display_order = index` for each id in `sibling_ids`. The sibling list
    /// is taken as the complete new order of the destination category and is
    /// not checked for membership. Returns whether the moved item existed.
    pub async fn reorder_and_reassign(
        &self,
        item_id: ItemId,
        new_category_id: CategoryId,
        sibling_ids: &[ItemId],
    ) -> DaoResult<bool> {
        let txn = self.begin().await?;

        let moved = Item::update_many()
            .col_expr(item::Column::CategoryId, Expr::value(Some(new_category_id)))
            .filter(item::Column::Id.eq(item_id))
            .exec(&txn)
            .await?;

        for (index, sibling_id) in sibling_ids.iter().enumerate() {
            Item::update_many()
                .col_expr(item::Column::DisplayOrder, Expr::value(index as i32))
                .filter(item::Column::Id.eq(*sibling_id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(moved.rows_affected > 0)
    }

    /// Sets `is_deleted`; the row stays in storage.
    pub async fn soft_delete(&self, id: ItemId) -> DaoResult<bool> {
        let result = Item::update_many()
            .col_expr(item::Column::IsDeleted, Expr::value(true))
            .filter(item::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

async fn next_display_order<C: ConnectionTrait>(
    conn: &C,
    category_id: Option<CategoryId>,
) -> DaoResult<i32> {
    let Some(category_id) = category_id else {
        return Ok(1);
    };
    let max_order: Option<i32> = Item::find()
        .select_only()
        .column_as(item::Column::DisplayOrder.max(), "max_order")
        .filter(item::Column::CategoryId.eq(category_id))
        .into_tuple::<Option<i32>>()
        .one(conn)
        .await?
        .flatten();
    Ok(max_order.unwrap_or(0) + 1)
}
