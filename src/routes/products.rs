use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::products::ProductRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Product, ProductDetail},
    response::ApiResponse,
    routes::params::{IdPath, LimitQuery, ProductQuery},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/best-sellers", get(best_sellers))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "List products with category and variants", body = ApiResponse<Vec<ProductDetail>>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<Vec<ProductDetail>>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/products/best-sellers",
    params(LimitQuery),
    responses(
        (status = 200, description = "Products ranked by units sold", body = ApiResponse<Vec<ProductDetail>>)
    ),
    tag = "Products"
)]
pub async fn best_sellers(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<ApiResponse<Vec<ProductDetail>>>> {
    let resp = product_service::best_sellers(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found or inactive"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = product_service::get_product(&state, id, false).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid input"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
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
    put,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
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
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}
