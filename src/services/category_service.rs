use crate::{
    db::dao::{CategoryDao, CategoryRemoval, DaoBase, ListDao},
    db::entities::{CategoryId, ListId, category},
    error::AppError,
    services::list_service::require_name,
};

#[derive(Clone)]
pub struct CategoryService {
    category_dao: CategoryDao,
    list_dao: ListDao,
}

impl CategoryService {
    pub fn new(category_dao: CategoryDao, list_dao: ListDao) -> Self {
        Self {
            category_dao,
            list_dao,
        }
    }

    pub async fn create(&self, list_id: ListId, name: &str) -> Result<category::Model, AppError> {
        let name = require_name(name, "Category name is required")?;
        self.list_dao.find_by_id(list_id).await?;
        let category = self.category_dao.create(list_id, name).await?;
        tracing::info!(
            category_id = category.id,
            list_id,
            display_order = category.display_order,
            "created category"
        );
        Ok(category)
    }

    pub async fn all_for_list(&self, list_id: ListId) -> Result<Vec<category::Model>, AppError> {
        Ok(self.category_dao.all_for_list(list_id).await?)
    }

    pub async fn require(&self, id: CategoryId) -> Result<category::Model, AppError> {
        Ok(self.category_dao.find_by_id(id).await?)
    }

    pub async fn rename(&self, id: CategoryId, name: &str) -> Result<(), AppError> {
        let name = require_name(name, "New name is required")?;
        if !self.category_dao.rename(id, name).await? {
            return Err(AppError::not_found("Category not found"));
        }
        Ok(())
    }

    /// Persists a client-side drag-and-drop order: position in `ids`
    /// becomes the display order.
    pub async fn reorder(&self, ids: &[CategoryId]) -> Result<(), AppError> {
        if ids.is_empty() {
            return Ok(());
        }
        let updated = self.category_dao.reorder(ids).await?;
        tracing::debug!(requested = ids.len(), updated, "reordered categories");
        Ok(())
    }

    /// Deletes a category, moving its items to the list's "Other" category.
    /// Deleting "Other" or an unknown id is a silent no-op.
    pub async fn delete(&self, id: CategoryId) -> Result<CategoryRemoval, AppError> {
        let outcome = self.category_dao.delete_reassigning(id).await?;
        match outcome {
            CategoryRemoval::Missing => {
                tracing::debug!(category_id = id, "delete of unknown category ignored");
            }
            CategoryRemoval::Protected => {
                tracing::debug!(category_id = id, "refusing to delete \"Other\" category");
            }
            CategoryRemoval::Removed {
                fallback_id: Some(fallback_id),
                reassigned,
            } => {
                tracing::info!(category_id = id, fallback_id, reassigned, "deleted category");
            }
            CategoryRemoval::Removed {
                fallback_id: None, ..
            } => {
                tracing::warn!(
                    category_id = id,
                    "deleted category in a list without an \"Other\" category; its items were not reassigned"
                );
            }
        }
        Ok(outcome)
    }

    /// Category that receives items created without an explicit category:
    /// the "Other" category of the given list.
    pub async fn resolve_default_category(&self, list_id: ListId) -> Result<CategoryId, AppError> {
        self.category_dao
            .find_other(list_id)
            .await?
            .map(|other| other.id)
            .ok_or_else(|| {
                AppError::bad_request(format!(
                    "List {list_id} has no \"Other\" category; a category_id is required"
                ))
            })
    }
}
