use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{
    categories, extras, extras::ExtraCategoryType, order_item_extras, order_items, orders,
    orders::OrderStatus, products, variants,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub is_active: bool,
}

/// Category row plus the image of its most prominent active product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryWithImage {
    pub id: i32,
    pub name: String,
    pub is_active: bool,
    pub representative_image_url: Option<String>,
}

/// `GET /categories` returns plain rows, or rows with images when
/// `include_representative` is set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CategoryList {
    WithImages(Vec<CategoryWithImage>),
    Plain(Vec<Category>),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub featured_rank: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Variant {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub price: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Extra {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub category_type: ExtraCategoryType,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub total: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub variant_id: Option<i32>,
    pub quantity: i32,
    pub unit_price: String,
    pub product_name: String,
    pub variant_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemExtra {
    pub id: i32,
    pub order_item_id: i32,
    pub extra_id: Option<i32>,
    pub quantity: i32,
    pub unit_price: String,
    pub extra_name: String,
    pub category_type: ExtraCategoryType,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemWithExtras {
    #[serde(flatten)]
    pub item: OrderItem,
    pub extras: Vec<OrderItemExtra>,
}

/// An order with its lines and their extras, as returned after creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemWithExtras>,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            is_active: model.is_active,
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            name: model.name,
            description: model.description,
            image_url: model.image_url,
            is_featured: model.is_featured,
            featured_rank: model.featured_rank,
            is_active: model.is_active,
        }
    }
}

impl From<variants::Model> for Variant {
    fn from(model: variants::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            name: model.name,
            price: model.price,
            is_active: model.is_active,
        }
    }
}

impl From<extras::Model> for Extra {
    fn from(model: extras::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            category_type: model.category_type,
            is_active: model.is_active,
        }
    }
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name,
            customer_email: model.customer_email,
            customer_phone: model.customer_phone,
            notes: model.notes,
            status: model.status,
            total: model.total,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            variant_id: model.variant_id,
            quantity: model.quantity,
            unit_price: model.unit_price,
            product_name: model.product_name,
            variant_name: model.variant_name,
        }
    }
}

impl From<order_item_extras::Model> for OrderItemExtra {
    fn from(model: order_item_extras::Model) -> Self {
        Self {
            id: model.id,
            order_item_id: model.order_item_id,
            extra_id: model.extra_id,
            quantity: model.quantity,
            unit_price: model.unit_price,
            extra_name: model.extra_name,
            category_type: model.category_type,
        }
    }
}
