pub mod auth_service;
pub mod category_service;
pub mod extra_service;
pub mod order_item_service;
pub mod order_service;
pub mod product_service;
pub mod upload_service;
pub mod variant_service;
