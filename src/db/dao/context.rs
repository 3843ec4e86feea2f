use sea_orm::DatabaseConnection;

use super::{CategoryDao, DaoBase, ItemDao, ListDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn list(&self) -> ListDao {
        DaoBase::new(&self.db)
    }

    pub fn category(&self) -> CategoryDao {
        DaoBase::new(&self.db)
    }

    pub fn item(&self) -> ItemDao {
        DaoBase::new(&self.db)
    }
}
