use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ExtraCategoryType {
    #[sea_orm(string_value = "general")]
    General,
    #[sea_orm(string_value = "dije")]
    Dije,
    #[sea_orm(string_value = "cadena")]
    Cadena,
    #[sea_orm(string_value = "servicio")]
    Servicio,
}

impl ExtraCategoryType {
    pub const ALL: [ExtraCategoryType; 4] = [
        ExtraCategoryType::General,
        ExtraCategoryType::Dije,
        ExtraCategoryType::Cadena,
        ExtraCategoryType::Servicio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtraCategoryType::General => "general",
            ExtraCategoryType::Dije => "dije",
            ExtraCategoryType::Cadena => "cadena",
            ExtraCategoryType::Servicio => "servicio",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "extras")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: String,
    pub category_type: ExtraCategoryType,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item_extras::Entity")]
    OrderItemExtras,
}

impl Related<super::order_item_extras::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItemExtras.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
