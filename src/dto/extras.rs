use serde::Deserialize;
use utoipa::ToSchema;

use super::de;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ExtraRequest {
    #[serde(default, deserialize_with = "de::opt_trimmed")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_price")]
    pub price: Option<String>,
    /// One of `general`, `dije`, `cadena`, `servicio`.
    #[serde(default, alias = "categoryType", deserialize_with = "de::opt_trimmed")]
    pub category_type: Option<String>,
    #[serde(default, alias = "isActive", deserialize_with = "de::opt_bool")]
    pub is_active: Option<bool>,
}
