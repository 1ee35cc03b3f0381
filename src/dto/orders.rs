use serde::Deserialize;
use utoipa::ToSchema;

use super::de;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default, alias = "customerName", deserialize_with = "de::opt_trimmed")]
    pub customer_name: Option<String>,
    #[serde(default, alias = "customerEmail", deserialize_with = "de::opt_trimmed")]
    pub customer_email: Option<String>,
    #[serde(default, alias = "customerPhone", deserialize_with = "de::opt_trimmed")]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderItemRequest>>,
}

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    #[serde(default, alias = "productId", deserialize_with = "de::opt_number")]
    pub product_id: Option<f64>,
    #[serde(default, alias = "variantId", deserialize_with = "de::opt_number")]
    pub variant_id: Option<f64>,
    /// Defaults to 1.
    #[serde(default, deserialize_with = "de::opt_number")]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub extras: Option<Vec<OrderItemExtraRequest>>,
}

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct OrderItemExtraRequest {
    #[serde(default, alias = "extraId", deserialize_with = "de::opt_number")]
    pub extra_id: Option<f64>,
    /// Defaults to 1.
    #[serde(default, deserialize_with = "de::opt_number")]
    pub quantity: Option<f64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}
