use sea_orm::entity::prelude::*;

/// A priced order line. `unit_price`, `product_name` and `variant_name` are
/// copied from the catalog when the order is placed and never refreshed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub variant_id: Option<i32>,
    pub quantity: i32,
    pub unit_price: String,
    pub product_name: String,
    pub variant_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_delete = "Cascade"
    )]
    Orders,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_delete = "SetNull"
    )]
    Products,
    #[sea_orm(
        belongs_to = "super::variants::Entity",
        from = "Column::VariantId",
        to = "super::variants::Column::Id",
        on_delete = "SetNull"
    )]
    Variants,
    #[sea_orm(has_many = "super::order_item_extras::Entity")]
    OrderItemExtras,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::variants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variants.def()
    }
}

impl Related<super::order_item_extras::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItemExtras.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
