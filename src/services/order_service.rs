use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, LoaderTrait,
    ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    dto::{
        de::as_id,
        orders::{CreateOrderRequest, OrderItemExtraRequest, OrderItemRequest, UpdateOrderStatusRequest},
    },
    entity::{
        extras::Entity as Extras,
        order_item_extras::{ActiveModel as OrderItemExtraActive, Entity as OrderItemExtras},
        order_items::{self, ActiveModel as OrderItemActive, Entity as OrderItems},
        orders::{self, ActiveModel as OrderActive, Entity as Orders, OrderStatus},
        products::Entity as Products,
        variants::{self, Entity as Variants},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderDetail, OrderItemExtra, OrderItemWithExtras},
    money::{parse_price, to_fixed_2},
    response::{ApiResponse, Meta},
    routes::params::{LimitQuery, ORDER_LIMIT_DEFAULT, ORDER_LIMIT_MAX, clamp_limit},
    state::AppState,
};

/// Places an order in one transaction and returns it with its lines.
///
/// Every price is read from the catalog at this moment and copied onto the
/// line. Any failure rolls back the whole order.
pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderDetail>> {
    let customer_name = match payload.customer_name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => return Err(AppError::bad_request("customer_name required")),
    };
    if payload.items.as_ref().is_none_or(|items| items.is_empty()) {
        return Err(AppError::bad_request("items required"));
    }

    let txn = state.orm.begin().await?;
    let order = match persist_order(&txn, customer_name, payload).await {
        Ok(order) => order,
        Err(err) => {
            txn.rollback().await?;
            tracing::debug!(error = %err, "order rejected");
            return Err(err);
        }
    };
    txn.commit().await?;

    tracing::info!(order_id = order.id, total = %order.total, "order created");

    let detail = load_order_detail(&state.orm, order.id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Order created", detail, Some(Meta::empty())))
}

async fn persist_order(
    txn: &DatabaseTransaction,
    customer_name: String,
    payload: CreateOrderRequest,
) -> AppResult<orders::Model> {
    let order = OrderActive {
        customer_name: Set(customer_name),
        customer_email: Set(payload.customer_email.filter(|v| !v.is_empty())),
        customer_phone: Set(payload.customer_phone.filter(|v| !v.is_empty())),
        notes: Set(payload.notes),
        status: Set(OrderStatus::Pending),
        total: Set(to_fixed_2(0.0)),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    let mut total = 0.0_f64;
    for item in payload.items.unwrap_or_default() {
        total += persist_item(txn, order.id, item).await?;
    }

    let mut active: OrderActive = order.into();
    active.total = Set(to_fixed_2(total));
    Ok(active.update(txn).await?)
}

/// Inserts one line and its extras, returning the amount they add to the total.
async fn persist_item(txn: &DatabaseTransaction, order_id: i32, item: OrderItemRequest) -> AppResult<f64> {
    let product_ref = required(item.product_id, "product_id required in items")?;
    let variant_ref = required(item.variant_id, "variant_id required in items")?;
    let quantity = quantity(item.quantity, "invalid quantity")?;

    let product = match as_id(product_ref) {
        Some(id) => Products::find_by_id(id).one(txn).await?,
        None => None,
    }
    .ok_or_else(|| AppError::bad_request(format!("invalid product: {product_ref}")))?;

    let variant = match as_id(variant_ref) {
        Some(id) => {
            Variants::find_by_id(id)
                .filter(variants::Column::ProductId.eq(product.id))
                .one(txn)
                .await?
        }
        None => None,
    }
    .ok_or_else(|| AppError::bad_request(format!("invalid variant for product {}", product.id)))?;

    let unit_price = parse_price(&variant.price)
        .ok_or_else(|| AppError::bad_request("invalid price on variant"))?;

    let line = OrderItemActive {
        order_id: Set(order_id),
        product_id: Set(Some(product.id)),
        variant_id: Set(Some(variant.id)),
        quantity: Set(quantity),
        unit_price: Set(to_fixed_2(unit_price)),
        product_name: Set(product.name.clone()),
        variant_name: Set(Some(variant.name.clone())),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    let mut amount = unit_price * f64::from(quantity);
    for extra in item.extras.unwrap_or_default() {
        amount += persist_extra(txn, line.id, extra).await?;
    }
    Ok(amount)
}

async fn persist_extra(
    txn: &DatabaseTransaction,
    order_item_id: i32,
    request: OrderItemExtraRequest,
) -> AppResult<f64> {
    let extra_ref = required(request.extra_id, "extra_id required in extras")?;
    let quantity = quantity(request.quantity, "invalid quantity in extras")?;

    let extra = match as_id(extra_ref) {
        Some(id) => Extras::find_by_id(id).one(txn).await?,
        None => None,
    }
    .ok_or_else(|| AppError::bad_request(format!("invalid extra: {extra_ref}")))?;

    let unit_price = parse_price(&extra.price)
        .ok_or_else(|| AppError::bad_request("invalid price on extra"))?;

    OrderItemExtraActive {
        order_item_id: Set(order_item_id),
        extra_id: Set(Some(extra.id)),
        quantity: Set(quantity),
        unit_price: Set(to_fixed_2(unit_price)),
        extra_name: Set(extra.name.clone()),
        category_type: Set(extra.category_type),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok(unit_price * f64::from(quantity))
}

/// A reference counts as given unless it is absent, zero or not a number.
fn required(raw: Option<f64>, message: &str) -> AppResult<f64> {
    match raw {
        Some(v) if v != 0.0 && !v.is_nan() => Ok(v),
        _ => Err(AppError::bad_request(message)),
    }
}

/// Absent means 1. Anything but a positive whole number is rejected.
fn quantity(raw: Option<f64>, message: &str) -> AppResult<i32> {
    let value = raw.unwrap_or(1.0);
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(AppError::bad_request(message))
    }
}

/// The order with its lines (by id) and each line's extras (by id).
pub async fn load_order_detail<C>(db: &C, id: i32) -> AppResult<Option<OrderDetail>>
where
    C: ConnectionTrait,
{
    let Some(order) = Orders::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let lines = order
        .find_related(OrderItems)
        .order_by_asc(order_items::Column::Id)
        .all(db)
        .await?;
    let extras = lines.load_many(OrderItemExtras, db).await?;

    let items = lines
        .into_iter()
        .zip(extras)
        .map(|(line, mut extras)| {
            extras.sort_by_key(|e| e.id);
            OrderItemWithExtras {
                item: line.into(),
                extras: extras.into_iter().map(OrderItemExtra::from).collect(),
            }
        })
        .collect();

    Ok(Some(OrderDetail {
        order: order.into(),
        items,
    }))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: LimitQuery,
) -> AppResult<ApiResponse<Vec<Order>>> {
    ensure_admin(user)?;
    let limit = clamp_limit(query.limit.as_deref(), ORDER_LIMIT_DEFAULT, ORDER_LIMIT_MAX);

    let items: Vec<Order> = Orders::find()
        .order_by_desc(orders::Column::Id)
        .limit(limit)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let meta = Meta::new(Some(limit), items.len() as u64);
    Ok(ApiResponse::success("Orders", items, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_admin(user)?;
    let detail = load_order_detail(&state.orm, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Order", detail, Some(Meta::empty())))
}

/// Any valid status may replace any other. The total is never touched.
pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_admin(user)?;
    let raw = payload.status.unwrap_or_default();
    let status = OrderStatus::parse(raw.trim()).ok_or_else(|| {
        let valid: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        AppError::bad_request(format!(
            "invalid status: {raw}. Valid values: {}",
            valid.join(", ")
        ))
    })?;

    let order = match Orders::find_by_id(id).one(&state.orm).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    let previous = order.status;

    let mut active: OrderActive = order.into();
    active.status = Set(status);
    active.updated_at = Set(Some(Utc::now().into()));
    active.update(&state.orm).await?;

    tracing::info!(
        order_id = id,
        from = previous.as_str(),
        to = status.as_str(),
        admin = %user.username,
        "order status updated"
    );

    let detail = load_order_detail(&state.orm, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Order status updated", detail, Some(Meta::empty())))
}
