use serde::Deserialize;
use utoipa::ToSchema;

use super::de;

/// Create and update body. On update only the present fields change.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CategoryRequest {
    #[serde(default, deserialize_with = "de::opt_trimmed")]
    pub name: Option<String>,
    #[serde(default, alias = "isActive", deserialize_with = "de::opt_bool")]
    pub is_active: Option<bool>,
}
