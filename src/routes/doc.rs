use utoipa::{
    Modify, OpenApi,
    openapi::{
        self, OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        SetActiveRequest,
        auth::{LoginRequest, LoginResponse},
        categories::CategoryRequest,
        extras::ExtraRequest,
        orders::{CreateOrderRequest, OrderItemExtraRequest, OrderItemRequest, UpdateOrderStatusRequest},
        products::ProductRequest,
        uploads::{UploadImageForm, UploadedImage},
        variants::VariantRequest,
    },
    entity::{extras::ExtraCategoryType, orders::OrderStatus},
    models::{
        Category, CategoryDetail, CategoryList, CategoryWithImage, Extra, Order, OrderDetail,
        OrderItem, OrderItemExtra, OrderItemWithExtras, Product, ProductDetail, Variant,
    },
    response::Meta,
    routes::{
        admin_catalog, auth, categories, extras, health, order_items, orders, products, variants,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        products::list_products,
        products::best_sellers,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        variants::list_variants,
        variants::get_variant,
        variants::create_variant,
        variants::update_variant,
        variants::delete_variant,
        extras::list_extras,
        extras::get_extra,
        extras::create_extra,
        extras::update_extra,
        extras::delete_extra,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        order_items::list_order_items,
        order_items::get_order_item,
        order_items::list_order_item_extras,
        order_items::get_order_item_extra,
        admin_catalog::list_products,
        admin_catalog::get_product,
        admin_catalog::create_product,
        admin_catalog::update_product,
        admin_catalog::delete_product,
        admin_catalog::set_product_active,
        admin_catalog::list_categories,
        admin_catalog::get_category,
        admin_catalog::create_category,
        admin_catalog::update_category,
        admin_catalog::delete_category,
        admin_catalog::set_category_active,
        admin_catalog::list_variants,
        admin_catalog::get_variant,
        admin_catalog::create_variant,
        admin_catalog::update_variant,
        admin_catalog::delete_variant,
        admin_catalog::set_variant_active,
        admin_catalog::list_extras,
        admin_catalog::get_extra,
        admin_catalog::create_extra,
        admin_catalog::update_extra,
        admin_catalog::delete_extra,
        admin_catalog::set_extra_active,
        admin_catalog::list_orders,
        admin_catalog::get_order,
        admin_catalog::update_order_status,
        admin_catalog::upload_image
    ),
    components(
        schemas(
            Category,
            CategoryDetail,
            CategoryList,
            CategoryWithImage,
            Product,
            ProductDetail,
            Variant,
            Extra,
            ExtraCategoryType,
            Order,
            OrderStatus,
            OrderItem,
            OrderItemExtra,
            OrderItemWithExtras,
            OrderDetail,
            CategoryRequest,
            ProductRequest,
            VariantRequest,
            ExtraRequest,
            SetActiveRequest,
            CreateOrderRequest,
            OrderItemRequest,
            OrderItemExtraRequest,
            UpdateOrderStatusRequest,
            LoginRequest,
            LoginResponse,
            UploadedImage,
            UploadImageForm,
            Meta
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Admin login"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Variants", description = "Variant endpoints"),
        (name = "Extras", description = "Extra endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Order items", description = "Order line endpoints"),
        (name = "Admin", description = "Back-office catalog endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
