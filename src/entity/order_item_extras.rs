use sea_orm::entity::prelude::*;

use super::extras::ExtraCategoryType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_item_extras")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_item_id: i32,
    pub extra_id: Option<i32>,
    pub quantity: i32,
    pub unit_price: String,
    pub extra_name: String,
    pub category_type: ExtraCategoryType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order_items::Entity",
        from = "Column::OrderItemId",
        to = "super::order_items::Column::Id",
        on_delete = "Cascade"
    )]
    OrderItems,
    #[sea_orm(
        belongs_to = "super::extras::Entity",
        from = "Column::ExtraId",
        to = "super::extras::Column::Id",
        on_delete = "SetNull"
    )]
    Extras,
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::extras::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Extras.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
