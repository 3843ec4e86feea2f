use sea_orm::DatabaseConnection;

use crate::{
    db::dao::DaoContext,
    services::{
        board::BoardService, category_service::CategoryService, item_service::ItemService,
        list_service::ListService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn list(&self) -> ListService {
        ListService::new(self.daos.list())
    }

    pub fn category(&self) -> CategoryService {
        CategoryService::new(self.daos.category(), self.daos.list())
    }

    pub fn item(&self) -> ItemService {
        ItemService::new(self.daos.item(), self.category())
    }

    pub fn board(&self) -> BoardService {
        BoardService::new(self.daos.category(), self.daos.item())
    }
}
