use serde::Deserialize;
use utoipa::ToSchema;

use super::de;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VariantRequest {
    #[serde(default, alias = "productId", deserialize_with = "de::opt_number")]
    pub product_id: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_trimmed")]
    pub name: Option<String>,
    /// Number or numeric string, stored with two decimals.
    #[serde(default, deserialize_with = "de::opt_price")]
    pub price: Option<String>,
    #[serde(default, alias = "isActive", deserialize_with = "de::opt_bool")]
    pub is_active: Option<bool>,
}
