#[allow(unused_imports)]
pub mod prelude {
    pub use super::category::Entity as Category;
    pub use super::item::Entity as Item;
    pub use super::shopping_list::Entity as ShoppingList;
}

pub mod category;
pub mod item;
pub mod shopping_list;

/// Name of the per-list fallback category. It can never be deleted and
/// receives the items of any category that is.
pub const OTHER_CATEGORY_NAME: &str = "Other";

pub type ListId = i32;
pub type CategoryId = i32;
pub type ItemId = i32;
