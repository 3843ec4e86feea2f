use crate::{
    db::dao::{DaoBase, ItemDao, ItemFields, ItemWithCategory},
    db::entities::{CategoryId, ItemId, ListId, item},
    error::AppError,
    services::{category_service::CategoryService, list_service::require_name},
};

pub const DEFAULT_QUANTITY: i32 = 1;

/// Item payload as it arrives from a client; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInput {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub notes: Option<String>,
    pub who_needs_it: Option<String>,
    pub who_will_buy_it: Option<String>,
    pub category_id: Option<CategoryId>,
    pub is_completed: Option<bool>,
}

#[derive(Clone)]
pub struct ItemService {
    item_dao: ItemDao,
    categories: CategoryService,
}

impl ItemService {
    pub fn new(item_dao: ItemDao, categories: CategoryService) -> Self {
        Self {
            item_dao,
            categories,
        }
    }

    /// Adds an item to a list. Without a `category_id` the item goes to the
    /// list's "Other" category; a missing quantity defaults to 1. An unknown
    /// `category_id` is a `NotFound`.
    pub async fn create(&self, list_id: ListId, input: ItemInput) -> Result<item::Model, AppError> {
        let name = require_name(input.name.as_deref().unwrap_or(""), "Item name is required")?
            .to_string();
        let category_id = match input.category_id {
            Some(category_id) => self.categories.require(category_id).await?.id,
            None => self.categories.resolve_default_category(list_id).await?,
        };

        let fields = ItemFields {
            name,
            quantity: input.quantity.unwrap_or(DEFAULT_QUANTITY),
            notes: input.notes,
            who_needs_it: input.who_needs_it,
            who_will_buy_it: input.who_will_buy_it,
            category_id: Some(category_id),
            is_completed: input.is_completed.unwrap_or(false),
        };
        let item = self.item_dao.create(fields).await?;
        tracing::info!(item_id = item.id, category_id, "created item");
        Ok(item)
    }

    pub async fn all_for_list(&self, list_id: ListId) -> Result<Vec<ItemWithCategory>, AppError> {
        Ok(self.item_dao.all_for_list(list_id).await?)
    }

    pub async fn require(&self, id: ItemId) -> Result<item::Model, AppError> {
        Ok(self.item_dao.find_by_id(id).await?)
    }

    /// Full overwrite. Optional columns that are missing from `input` are
    /// cleared; `name` and `quantity` must be present.
    pub async fn update(&self, id: ItemId, input: ItemInput) -> Result<(), AppError> {
        let name = require_name(input.name.as_deref().unwrap_or(""), "Item name is required")?
            .to_string();
        let quantity = input
            .quantity
            .ok_or_else(|| AppError::bad_request("Item quantity is required"))?;
        if let Some(category_id) = input.category_id {
            self.categories.require(category_id).await?;
        }

        let fields = ItemFields {
            name,
            quantity,
            notes: input.notes,
            who_needs_it: input.who_needs_it,
            who_will_buy_it: input.who_will_buy_it,
            category_id: input.category_id,
            is_completed: input.is_completed.unwrap_or(false),
        };
        if !self.item_dao.overwrite(id, fields).await? {
            return Err(AppError::not_found("Item not found"));
        }
        Ok(())
    }

    pub async fn rename(&self, id: ItemId, name: &str) -> Result<(), AppError> {
        let name = require_name(name, "New name is required")?;
        if !self.item_dao.rename(id, name).await? {
            return Err(AppError::not_found("Item not found"));
        }
        Ok(())
    }

    pub async fn set_completed(&self, id: ItemId, is_completed: bool) -> Result<(), AppError> {
        if !self.item_dao.set_completed(id, is_completed).await? {
            return Err(AppError::not_found("Item not found"));
        }
        Ok(())
    }

    pub async fn clear_completed(&self, list_id: ListId) -> Result<u64, AppError> {
        let cleared = self.item_dao.clear_completed(list_id).await?;
        tracing::info!(list_id, cleared, "cleared completed items");
        Ok(cleared)
    }

    /// Drag-and-drop primitive: moves the item and rewrites the destination
    /// order exactly as the client sent it.
    pub async fn reorder_and_reassign(
        &self,
        item_id: ItemId,
        new_category_id: CategoryId,
        sibling_ids: &[ItemId],
    ) -> Result<(), AppError> {
        self.categories.require(new_category_id).await?;
        let moved = self
            .item_dao
            .reorder_and_reassign(item_id, new_category_id, sibling_ids)
            .await?;
        if !moved {
            tracing::debug!(item_id, "reorder referenced an unknown item");
        }
        Ok(())
    }

    /// Soft delete; the row stays in storage with `is_deleted` set.
    pub async fn delete(&self, id: ItemId) -> Result<(), AppError> {
        if !self.item_dao.soft_delete(id).await? {
            tracing::debug!(item_id = id, "delete of unknown item ignored");
        }
        Ok(())
    }
}
