//! Back-office catalog: the same entities as the public routes, but reads
//! include inactive rows and every route requires the admin role.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch, post},
};

use crate::{
    dto::{
        SetActiveRequest,
        categories::CategoryRequest,
        extras::ExtraRequest,
        orders::UpdateOrderStatusRequest,
        products::ProductRequest,
        uploads::{UploadImageForm, UploadedImage},
        variants::VariantRequest,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{
        Category, CategoryDetail, CategoryList, Extra, Order, OrderDetail, Product, ProductDetail,
        Variant,
    },
    response::ApiResponse,
    routes::params::{CategoryQuery, ExtraQuery, IdPath, LimitQuery, ProductQuery, VariantQuery},
    services::{
        category_service, extra_service, order_service, product_service,
        upload_service::{self, IncomingImage, MAX_IMAGE_BYTES},
        variant_service,
    },
    state::AppState,
};

const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route("/products/{id}/active", patch(set_product_active))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).patch(update_category).delete(delete_category),
        )
        .route("/categories/{id}/active", patch(set_category_active))
        .route("/variants", get(list_variants).post(create_variant))
        .route(
            "/variants/{id}",
            get(get_variant).patch(update_variant).delete(delete_variant),
        )
        .route("/variants/{id}/active", patch(set_variant_active))
        .route("/extras", get(list_extras).post(create_extra))
        .route(
            "/extras/{id}",
            get(get_extra).patch(update_extra).delete(delete_extra),
        )
        .route("/extras/{id}/active", patch(set_extra_active))
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", patch(update_order_status))
        .route(
            "/uploads",
            post(upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}

// Products

#[utoipa::path(
    get,
    path = "/admin/catalog/products",
    params(ProductQuery),
    responses((status = 200, description = "Products including inactive ones on request", body = ApiResponse<Vec<ProductDetail>>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<Vec<ProductDetail>>>> {
    ensure_admin(&user)?;
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/catalog/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product, active or not", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_product(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    ensure_admin(&user)?;
    let resp = product_service::get_product(&state, id, true).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/catalog/products",
    request_body = ProductRequest,
    responses((status = 201, description = "Create product", body = ApiResponse<Product>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let Json(payload) = payload?;
    let resp = product_service::create_product(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/admin/catalog/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses((status = 200, description = "Updated product", body = ApiResponse<Product>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let Json(payload) = payload?;
    let resp = product_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/catalog/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses((status = 200, description = "Deleted product", body = ApiResponse<Product>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/admin/catalog/products/{id}/active",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Toggled product", body = ApiResponse<Product>),
        (status = 400, description = "is_active missing"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_product_active(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    payload: Result<Json<SetActiveRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let Json(payload) = payload?;
    let resp = product_service::set_product_active(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

// Categories

#[utoipa::path(
    get,
    path = "/admin/catalog/categories",
    params(CategoryQuery),
    responses((status = 200, description = "Categories", body = ApiResponse<CategoryList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    ensure_admin(&user)?;
    let resp = category_service::list_categories(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/catalog/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category, active or not", body = ApiResponse<CategoryDetail>),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_category(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<CategoryDetail>>> {
    ensure_admin(&user)?;
    let resp = category_service::get_category(&state, id, true).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/catalog/categories",
    request_body = CategoryRequest,
    responses((status = 201, description = "Create category", body = ApiResponse<Category>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let Json(payload) = payload?;
    let resp = category_service::create_category(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/admin/catalog/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses((status = 200, description = "Updated category", body = ApiResponse<Category>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let Json(payload) = payload?;
    let resp = category_service::update_category(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/catalog/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "Deleted category", body = ApiResponse<Category>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::delete_category(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/admin/catalog/categories/{id}/active",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = SetActiveRequest,
    responses((status = 200, description = "Toggled category", body = ApiResponse<Category>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_category_active(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    payload: Result<Json<SetActiveRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let Json(payload) = payload?;
    let resp = category_service::set_category_active(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

// Variants

#[utoipa::path(
    get,
    path = "/admin/catalog/variants",
    params(VariantQuery),
    responses((status = 200, description = "Variants", body = ApiResponse<Vec<Variant>>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_variants(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<VariantQuery>,
) -> AppResult<Json<ApiResponse<Vec<Variant>>>> {
    ensure_admin(&user)?;
    let resp = variant_service::list_variants(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/catalog/variants/{id}",
    params(("id" = i32, Path, description = "Variant ID")),
    responses((status = 200, description = "Variant, active or not", body = ApiResponse<Variant>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_variant(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Variant>>> {
    ensure_admin(&user)?;
    let resp = variant_service::get_variant(&state, id, true).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/catalog/variants",
    request_body = VariantRequest,
    responses((status = 201, description = "Create variant", body = ApiResponse<Variant>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_variant(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<VariantRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Variant>>)> {
    let Json(payload) = payload?;
    let resp = variant_service::create_variant(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/admin/catalog/variants/{id}",
    params(("id" = i32, Path, description = "Variant ID")),
    request_body = VariantRequest,
    responses((status = 200, description = "Updated variant", body = ApiResponse<Variant>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_variant(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    payload: Result<Json<VariantRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Variant>>> {
    let Json(payload) = payload?;
    let resp = variant_service::update_variant(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/catalog/variants/{id}",
    params(("id" = i32, Path, description = "Variant ID")),
    responses((status = 200, description = "Deleted variant", body = ApiResponse<Variant>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_variant(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Variant>>> {
    let resp = variant_service::delete_variant(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/admin/catalog/variants/{id}/active",
    params(("id" = i32, Path, description = "Variant ID")),
    request_body = SetActiveRequest,
    responses((status = 200, description = "Toggled variant", body = ApiResponse<Variant>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_variant_active(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    payload: Result<Json<SetActiveRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Variant>>> {
    let Json(payload) = payload?;
    let resp = variant_service::set_variant_active(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

// Extras

#[utoipa::path(
    get,
    path = "/admin/catalog/extras",
    params(ExtraQuery),
    responses((status = 200, description = "Extras", body = ApiResponse<Vec<Extra>>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_extras(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ExtraQuery>,
) -> AppResult<Json<ApiResponse<Vec<Extra>>>> {
    ensure_admin(&user)?;
    let resp = extra_service::list_extras(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/catalog/extras/{id}",
    params(("id" = i32, Path, description = "Extra ID")),
    responses((status = 200, description = "Extra, active or not", body = ApiResponse<Extra>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_extra(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Extra>>> {
    ensure_admin(&user)?;
    let resp = extra_service::get_extra(&state, id, true).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/catalog/extras",
    request_body = ExtraRequest,
    responses((status = 201, description = "Create extra", body = ApiResponse<Extra>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_extra(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ExtraRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Extra>>)> {
    let Json(payload) = payload?;
    let resp = extra_service::create_extra(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/admin/catalog/extras/{id}",
    params(("id" = i32, Path, description = "Extra ID")),
    request_body = ExtraRequest,
    responses((status = 200, description = "Updated extra", body = ApiResponse<Extra>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_extra(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    payload: Result<Json<ExtraRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Extra>>> {
    let Json(payload) = payload?;
    let resp = extra_service::update_extra(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/catalog/extras/{id}",
    params(("id" = i32, Path, description = "Extra ID")),
    responses((status = 200, description = "Deleted extra", body = ApiResponse<Extra>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_extra(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Extra>>> {
    let resp = extra_service::delete_extra(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/admin/catalog/extras/{id}/active",
    params(("id" = i32, Path, description = "Extra ID")),
    request_body = SetActiveRequest,
    responses((status = 200, description = "Toggled extra", body = ApiResponse<Extra>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_extra_active(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    payload: Result<Json<SetActiveRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Extra>>> {
    let Json(payload) = payload?;
    let resp = extra_service::set_extra_active(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

// Orders

#[utoipa::path(
    get,
    path = "/admin/catalog/orders",
    params(LimitQuery),
    responses((status = 200, description = "Latest orders", body = ApiResponse<Vec<Order>>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let resp = order_service::list_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/catalog/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items and extras", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::get_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/admin/catalog/orders/{id}/status",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order with its new status", body = ApiResponse<OrderDetail>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    payload: Result<Json<UpdateOrderStatusRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let Json(payload) = payload?;
    let resp = order_service::update_order_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

// Uploads

#[utoipa::path(
    post,
    path = "/admin/catalog/uploads",
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Stored image", body = ApiResponse<UploadedImage>),
        (status = 400, description = "Missing file, wrong type or too large"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<UploadedImage>>)> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("image").to_string();
        let mime_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;
        image = Some(IncomingImage {
            original_name,
            mime_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let resp = upload_service::save_image(&state, &user, image).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
