use serde::Deserialize;
use utoipa::ToSchema;

use super::de;

/// Create and update body. On update only the present fields change.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductRequest {
    #[serde(default, alias = "categoryId", deserialize_with = "de::opt_number")]
    pub category_id: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_trimmed")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "imageUrl", deserialize_with = "de::opt_trimmed")]
    pub image_url: Option<String>,
    #[serde(default, alias = "isFeatured", deserialize_with = "de::opt_bool")]
    pub is_featured: Option<bool>,
    #[serde(default, alias = "featuredRank", deserialize_with = "de::opt_number")]
    pub featured_rank: Option<f64>,
    #[serde(default, alias = "isActive", deserialize_with = "de::opt_bool")]
    pub is_active: Option<bool>,
}
