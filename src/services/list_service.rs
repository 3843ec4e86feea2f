use crate::{
    db::dao::{DaoBase, ListDao},
    db::entities::{ListId, shopping_list},
    error::AppError,
};

#[derive(Clone)]
pub struct ListService {
    list_dao: ListDao,
}

impl ListService {
    pub fn new(list_dao: ListDao) -> Self {
        Self { list_dao }
    }

    /// Creates a list and its "Other" category.
    pub async fn create(&self, name: &str) -> Result<shopping_list::Model, AppError> {
        let name = require_name(name, "List name is required")?;
        let (list, other) = self.list_dao.create_with_other(name).await?;
        tracing::info!(list_id = list.id, other_id = other.id, "created shopping list");
        Ok(list)
    }

    /// Bootstraps "Main List" when the store holds no list at all.
    pub async fn create_default(&self) -> Result<Option<shopping_list::Model>, AppError> {
        let created = self.list_dao.create_default().await?;
        if let Some(list) = created.as_ref() {
            tracing::info!(list_id = list.id, "created default shopping list");
        }
        Ok(created)
    }

    pub async fn all(&self) -> Result<Vec<shopping_list::Model>, AppError> {
        Ok(self.list_dao.all().await?)
    }

    pub async fn require(&self, id: ListId) -> Result<shopping_list::Model, AppError> {
        Ok(self.list_dao.find_by_id(id).await?)
    }

    pub async fn rename(&self, id: ListId, name: &str) -> Result<(), AppError> {
        let name = require_name(name, "New name is required")?;
        if !self.list_dao.rename(id, name).await? {
            return Err(AppError::not_found("List not found"));
        }
        Ok(())
    }

    /// Hard delete, cascading to the list's categories and items.
    pub async fn delete(&self, id: ListId) -> Result<(), AppError> {
        if self.list_dao.delete(id).await? {
            tracing::info!(list_id = id, "deleted shopping list");
        } else {
            tracing::debug!(list_id = id, "delete of unknown shopping list ignored");
        }
        Ok(())
    }

    /// Picks the list a request works on: the requested one when it exists,
    /// otherwise the first list. An empty store gets the default list first.
    pub async fn resolve_active(
        &self,
        requested: Option<ListId>,
    ) -> Result<shopping_list::Model, AppError> {
        let mut lists = self.list_dao.all().await?;
        if lists.is_empty() {
            self.create_default().await?;
            lists = self.list_dao.all().await?;
        }

        if let Some(found) = requested.and_then(|id| lists.iter().position(|list| list.id == id))
        {
            return Ok(lists.swap_remove(found));
        }

        lists
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("No shopping list available"))
    }
}

pub(crate) fn require_name<'a>(name: &'a str, message: &'static str) -> Result<&'a str, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(message));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::{ListService, require_name};
    use crate::db::dao::DaoContext;
    use crate::db::entities::shopping_list;
    use crate::error::AppError;

    fn list(id: i32, name: &str) -> shopping_list::Model {
        shopping_list::Model {
            id,
            name: name.to_string(),
        }
    }

    fn service(lists: Vec<shopping_list::Model>) -> ListService {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([lists])
            .into_connection();
        ListService::new(DaoContext::new(&db).list())
    }

    #[test]
    fn require_name_trims_and_rejects_blank() {
        assert_eq!(require_name("  Milk ", "x").expect("name is present"), "Milk");
        let err = require_name("   ", "Name is required").expect_err("blank name");
        assert!(matches!(err, AppError::BadRequest(message) if message == "Name is required"));
    }

    #[tokio::test]
    async fn resolve_active_prefers_requested_list() {
        let service = service(vec![list(1, "Main List"), list(4, "Hardware")]);

        let active = service.resolve_active(Some(4)).await.expect("lists exist");
        assert_eq!(active.id, 4);
    }

    #[tokio::test]
    async fn resolve_active_falls_back_to_first_list() {
        let first = service(vec![list(2, "Groceries"), list(3, "Pharmacy")]);

        let active = first.resolve_active(Some(99)).await.expect("lists exist");
        assert_eq!(active.id, 2);

        let second = service(vec![list(2, "Groceries"), list(3, "Pharmacy")]);
        let active = second.resolve_active(None).await.expect("lists exist");
        assert_eq!(active.id, 2);
    }

    #[tokio::test]
    async fn rename_rejects_blank_name_before_storage() {
        let service = service(Vec::new());

        let err = service.rename(1, " ").await.expect_err("blank name");
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
