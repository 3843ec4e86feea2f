use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};

use super::dao::{DaoResult, list_dao::DEFAULT_LIST_NAME};
use super::entities::prelude::{Category, ShoppingList};
use super::entities::{OTHER_CATEGORY_NAME, category, shopping_list};

pub const SEED_LIST_ID: i32 = 1;
pub const SEED_CATEGORY_ID: i32 = 1;
/// Categories created later in the seed list continue from this value.
pub const SEED_CATEGORY_ORDER: i32 = 99_999;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub list: bool,
    pub category: bool,
}

impl SeedReport {
    pub fn any(&self) -> bool {
        self.list || self.category
    }
}

/// Ensures list 1 "Main List" and its category 1 "Other" exist. Rows that
/// are already present are left exactly as they are.
pub async fn ensure_seed_rows(db: &DatabaseConnection) -> DaoResult<SeedReport> {
    let txn = db.begin().await?;
    let mut report = SeedReport::default();

    if ShoppingList::find_by_id(SEED_LIST_ID).one(&txn).await?.is_none() {
        shopping_list::ActiveModel {
            id: Set(SEED_LIST_ID),
            name: Set(DEFAULT_LIST_NAME.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        report.list = true;
    }

    if Category::find_by_id(SEED_CATEGORY_ID).one(&txn).await?.is_none() {
        category::ActiveModel {
            id: Set(SEED_CATEGORY_ID),
            name: Set(OTHER_CATEGORY_NAME.to_string()),
            display_order: Set(SEED_CATEGORY_ORDER),
            list_id: Set(SEED_LIST_ID),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        report.category = true;
    }

    txn.commit().await?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    use super::{SEED_CATEGORY_ID, SEED_CATEGORY_ORDER, SEED_LIST_ID, SeedReport, ensure_seed_rows};
    use crate::config::DatabaseConfig;
    use crate::db::connection;
    use crate::db::entities::prelude::{Category, ShoppingList};
    use crate::db::entities::shopping_list;

    #[tokio::test]
    async fn seed_rows_exist_after_connect() {
        let db = connection::connect(&DatabaseConfig::in_memory())
            .await
            .expect("connect");

        let list = ShoppingList::find_by_id(SEED_LIST_ID)
            .one(&db)
            .await
            .expect("select list")
            .expect("seed list");
        assert_eq!(list.name, "Main List");

        let other = Category::find_by_id(SEED_CATEGORY_ID)
            .one(&db)
            .await
            .expect("select category")
            .expect("seed category");
        assert_eq!(other.name, "Other");
        assert_eq!(other.list_id, SEED_LIST_ID);
        assert_eq!(other.display_order, SEED_CATEGORY_ORDER);
    }

    #[tokio::test]
    async fn existing_seed_rows_are_not_overwritten() {
        let db = connection::connect(&DatabaseConfig::in_memory())
            .await
            .expect("connect");
        shopping_list::ActiveModel {
            id: Set(SEED_LIST_ID),
            name: Set("Weekly".to_string()),
            ..Default::default()
        }
        .update(&db)
        .await
        .expect("rename seed list");

        let report = ensure_seed_rows(&db).await.expect("second bootstrap");
        assert_eq!(report, SeedReport::default());

        let list = ShoppingList::find_by_id(SEED_LIST_ID)
            .one(&db)
            .await
            .expect("select list")
            .expect("seed list");
        assert_eq!(list.name, "Weekly");
    }
}
