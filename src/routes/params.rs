use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{dto::de::is_truthy, error::AppError};

pub const ORDER_LIMIT_DEFAULT: u64 = 50;
pub const ORDER_LIMIT_MAX: u64 = 200;
pub const BEST_SELLER_LIMIT_DEFAULT: u64 = 8;
pub const BEST_SELLER_LIMIT_MAX: u64 = 50;

/// Query flags are kept as raw strings and interpreted here.
pub fn parse_bool(raw: Option<&str>) -> bool {
    raw.is_some_and(is_truthy)
}

/// Active-only unless `include_inactive` is truthy; then `is_active`, when
/// present, narrows to that value and its absence means no filter.
pub fn active_filter(include_inactive: Option<&str>, is_active: Option<&str>) -> Option<bool> {
    if !parse_bool(include_inactive) {
        return Some(true);
    }
    match is_active.map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(is_truthy(raw)),
    }
}

/// A numeric limit with a default, clamped to `[1, max]`.
pub fn clamp_limit(raw: Option<&str>, default: u64, max: u64) -> u64 {
    let parsed = raw
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .and_then(|r| r.parse::<f64>().ok())
        .filter(|v| v.is_finite());
    match parsed {
        Some(value) => value.clamp(1.0, max as f64) as u64,
        None => default,
    }
}

/// A strictly positive limit, or no limit at all.
pub fn positive_limit(raw: Option<&str>) -> Option<u64> {
    raw.map(str::trim)
        .and_then(|r| r.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 1.0)
        .map(|v| v as u64)
}

pub fn parse_id(raw: Option<&str>) -> Option<i32> {
    raw.map(str::trim)
        .and_then(|r| r.parse::<f64>().ok())
        .and_then(crate::dto::de::as_id)
}

/// The `{id}` segment of a resource path. Ids that are not positive whole
/// numbers cannot exist, so they are a 404 like any other unknown id.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_id(Some(&raw)).map(IdPath).ok_or(AppError::NotFound)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    #[serde(alias = "includeRepresentative")]
    pub include_representative: Option<String>,
    #[serde(alias = "includeInactive")]
    pub include_inactive: Option<String>,
    #[serde(alias = "isActive")]
    pub is_active: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    #[serde(alias = "categoryId")]
    pub category_id: Option<String>,
    #[serde(alias = "is_featured", alias = "isFeatured")]
    pub featured: Option<String>,
    #[serde(alias = "take")]
    pub limit: Option<String>,
    #[serde(alias = "includeInactive")]
    pub include_inactive: Option<String>,
    #[serde(alias = "isActive")]
    pub is_active: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VariantQuery {
    #[serde(alias = "productId")]
    pub product_id: Option<String>,
    #[serde(alias = "includeInactive")]
    pub include_inactive: Option<String>,
    #[serde(alias = "isActive")]
    pub is_active: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExtraQuery {
    #[serde(alias = "categoryType")]
    pub category_type: Option<String>,
    #[serde(alias = "includeInactive")]
    pub include_inactive: Option<String>,
    #[serde(alias = "isActive")]
    pub is_active: Option<String>,
}

/// `limit` (alias `take`) for order listings and best sellers.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    #[serde(alias = "take")]
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderItemQuery {
    #[serde(alias = "orderId")]
    pub order_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderItemExtraQuery {
    #[serde(alias = "orderItemId")]
    pub order_item_id: Option<String>,
}
