use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity::{
        order_item_extras::{self, Entity as OrderItemExtras},
        order_items::{self, Entity as OrderItems},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{OrderItem, OrderItemExtra},
    response::{ApiResponse, Meta},
    routes::params::{OrderItemExtraQuery, OrderItemQuery, parse_id},
    state::AppState,
};

pub async fn list_order_items(
    state: &AppState,
    user: &AuthUser,
    query: OrderItemQuery,
) -> AppResult<ApiResponse<Vec<OrderItem>>> {
    ensure_admin(user)?;
    let mut finder = OrderItems::find();
    if let Some(order_id) = parse_id(query.order_id.as_deref()) {
        finder = finder.filter(order_items::Column::OrderId.eq(order_id));
    }

    let items: Vec<OrderItem> = finder
        .order_by_desc(order_items::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Order items", items, Some(meta)))
}

pub async fn get_order_item(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<OrderItem>> {
    ensure_admin(user)?;
    match OrderItems::find_by_id(id).one(&state.orm).await? {
        Some(item) => Ok(ApiResponse::success("Order item", item.into(), None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn list_order_item_extras(
    state: &AppState,
    user: &AuthUser,
    query: OrderItemExtraQuery,
) -> AppResult<ApiResponse<Vec<OrderItemExtra>>> {
    ensure_admin(user)?;
    let mut finder = OrderItemExtras::find();
    if let Some(order_item_id) = parse_id(query.order_item_id.as_deref()) {
        finder = finder.filter(order_item_extras::Column::OrderItemId.eq(order_item_id));
    }

    let items: Vec<OrderItemExtra> = finder
        .order_by_desc(order_item_extras::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderItemExtra::from)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Order item extras", items, Some(meta)))
}

pub async fn get_order_item_extra(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<OrderItemExtra>> {
    ensure_admin(user)?;
    match OrderItemExtras::find_by_id(id).one(&state.orm).await? {
        Some(extra) => Ok(ApiResponse::success("Order item extra", extra.into(), None)),
        None => Err(AppError::NotFound),
    }
}
