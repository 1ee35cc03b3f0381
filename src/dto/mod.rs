pub mod auth;
pub mod categories;
pub mod de;
pub mod extras;
pub mod orders;
pub mod products;
pub mod uploads;
pub mod variants;

use serde::Deserialize;
use utoipa::ToSchema;

/// Body of the `/active` toggles.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    #[serde(default, alias = "isActive", deserialize_with = "de::opt_bool")]
    pub is_active: Option<bool>,
}
