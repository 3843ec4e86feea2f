pub mod board;
pub mod category_service;
pub mod context;
pub mod item_service;
pub mod list_service;

pub use context::ServiceContext;
