use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub display_order: i32,
    #[sea_orm(indexed)]
    pub list_id: i32,
    #[sea_orm(belongs_to, from = "list_id", to = "id", on_delete = "Cascade")]
    pub list: HasOne<super::shopping_list::Entity>,
    #[sea_orm(has_many)]
    pub items: HasMany<super::item::Entity>,
}

impl Model {
    pub fn is_other(&self) -> bool {
        self.name == super::OTHER_CATEGORY_NAME
    }
}

impl ActiveModelBehavior for ActiveModel {}
