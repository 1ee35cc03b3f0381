use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::{OrderItem, OrderItemExtra},
    response::ApiResponse,
    routes::params::{IdPath, OrderItemExtraQuery, OrderItemQuery},
    services::order_item_service,
    state::AppState,
};

pub fn items_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_order_items))
        .route("/{id}", get(get_order_item))
}

pub fn extras_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_order_item_extras))
        .route("/{id}", get(get_order_item_extra))
}

#[utoipa::path(
    get,
    path = "/order-items",
    params(OrderItemQuery),
    responses((status = 200, description = "Order lines, newest first", body = ApiResponse<Vec<OrderItem>>)),
    security(("bearer_auth" = [])),
    tag = "Order items"
)]
pub async fn list_order_items(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderItemQuery>,
) -> AppResult<Json<ApiResponse<Vec<OrderItem>>>> {
    let resp = order_item_service::list_order_items(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/order-items/{id}",
    params(("id" = i32, Path, description = "Order item ID")),
    responses(
        (status = 200, description = "Order line", body = ApiResponse<OrderItem>),
        (status = 404, description = "Not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Order items"
)]
pub async fn get_order_item(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<OrderItem>>> {
    let resp = order_item_service::get_order_item(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/order-item-extras",
    params(OrderItemExtraQuery),
    responses((status = 200, description = "Order line extras, newest first", body = ApiResponse<Vec<OrderItemExtra>>)),
    security(("bearer_auth" = [])),
    tag = "Order items"
)]
pub async fn list_order_item_extras(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderItemExtraQuery>,
) -> AppResult<Json<ApiResponse<Vec<OrderItemExtra>>>> {
    let resp = order_item_service::list_order_item_extras(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/order-item-extras/{id}",
    params(("id" = i32, Path, description = "Order item extra ID")),
    responses(
        (status = 200, description = "Order line extra", body = ApiResponse<OrderItemExtra>),
        (status = 404, description = "Not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Order items"
)]
pub async fn get_order_item_extra(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<OrderItemExtra>>> {
    let resp = order_item_service::get_order_item_extra(&state, &user, id).await?;
    Ok(Json(resp))
}
