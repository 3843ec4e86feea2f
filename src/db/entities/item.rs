use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub notes: Option<String>,
    pub who_needs_it: Option<String>,
    pub who_will_buy_it: Option<String>,
    #[sea_orm(default_value = false)]
    pub is_deleted: bool,
    #[sea_orm(default_value = false)]
    pub is_completed: bool,
    #[sea_orm(indexed)]
    pub category_id: Option<i32>,
    pub display_order: i32,
    #[sea_orm(belongs_to, from = "category_id", to = "id", on_delete = "Cascade")]
    pub category: HasOne<super::category::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
