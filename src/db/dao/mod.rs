pub mod base;
pub mod category_dao;
mod context;
pub mod error;
pub mod item_dao;
pub mod list_dao;

pub use base::DaoBase;
pub use category_dao::{CategoryDao, CategoryRemoval};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use item_dao::{ItemDao, ItemFields, ItemWithCategory};
pub use list_dao::ListDao;
