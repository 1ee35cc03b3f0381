use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    dto::{SetActiveRequest, de::as_id, variants::VariantRequest},
    entity::{
        products::Entity as Products,
        variants::{self, ActiveModel as VariantActive, Entity as Variants},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Variant,
    money::normalize_price,
    response::{ApiResponse, Meta},
    routes::params::{VariantQuery, active_filter, parse_id},
    state::AppState,
};

pub async fn list_variants(
    state: &AppState,
    query: VariantQuery,
) -> AppResult<ApiResponse<Vec<Variant>>> {
    let mut finder = Variants::find();
    if let Some(product_id) = parse_id(query.product_id.as_deref()) {
        finder = finder.filter(variants::Column::ProductId.eq(product_id));
    }
    if let Some(active) = active_filter(
        query.include_inactive.as_deref(),
        query.is_active.as_deref(),
    ) {
        finder = finder.filter(variants::Column::IsActive.eq(active));
    }

    let items: Vec<Variant> = finder
        .order_by_asc(variants::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Variant::from)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Variants", items, Some(meta)))
}

pub async fn get_variant(
    state: &AppState,
    id: i32,
    include_inactive: bool,
) -> AppResult<ApiResponse<Variant>> {
    match Variants::find_by_id(id).one(&state.orm).await? {
        Some(v) if include_inactive || v.is_active => {
            Ok(ApiResponse::success("Variant", v.into(), None))
        }
        _ => Err(AppError::NotFound),
    }
}

pub async fn create_variant(
    state: &AppState,
    user: &AuthUser,
    payload: VariantRequest,
) -> AppResult<ApiResponse<Variant>> {
    ensure_admin(user)?;
    let product_id = match payload.product_id {
        Some(raw) => ensure_product(state, raw).await?,
        None => return Err(AppError::bad_request("product_id required")),
    };
    let name = match payload.name.filter(|n| !n.is_empty()) {
        Some(n) => n,
        None => return Err(AppError::bad_request("name required")),
    };
    let price = match payload.price {
        Some(raw) => price(&raw)?,
        None => return Err(AppError::bad_request("price required")),
    };

    let variant = VariantActive {
        product_id: Set(product_id),
        name: Set(name),
        price: Set(price),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(variant_id = variant.id, product_id, "variant created");

    Ok(ApiResponse::success(
        "Variant created",
        variant.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_variant(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: VariantRequest,
) -> AppResult<ApiResponse<Variant>> {
    ensure_admin(user)?;
    let existing = match Variants::find_by_id(id).one(&state.orm).await? {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };

    let mut active: VariantActive = existing.into();
    if let Some(raw) = payload.product_id {
        active.product_id = Set(ensure_product(state, raw).await?);
    }
    if let Some(name) = payload.name {
        if name.is_empty() {
            return Err(AppError::bad_request("name cannot be empty"));
        }
        active.name = Set(name);
    }
    if let Some(raw) = payload.price {
        active.price = Set(price(&raw)?);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    let variant = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        variant.into(),
        Some(Meta::empty()),
    ))
}

pub async fn set_variant_active(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: SetActiveRequest,
) -> AppResult<ApiResponse<Variant>> {
    ensure_admin(user)?;
    let is_active = payload
        .is_active
        .ok_or_else(|| AppError::bad_request("is_active required"))?;
    update_variant(
        state,
        user,
        id,
        VariantRequest {
            is_active: Some(is_active),
            ..Default::default()
        },
    )
    .await
}

pub async fn delete_variant(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Variant>> {
    ensure_admin(user)?;
    let existing = match Variants::find_by_id(id).one(&state.orm).await? {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };

    existing.clone().delete(&state.orm).await?;
    tracing::info!(variant_id = id, admin = %user.username, "variant deleted");

    Ok(ApiResponse::success(
        "Deleted",
        existing.into(),
        Some(Meta::empty()),
    ))
}

async fn ensure_product(state: &AppState, raw: f64) -> AppResult<i32> {
    let id = as_id(raw).ok_or_else(|| AppError::bad_request("invalid product_id"))?;
    match Products::find_by_id(id).one(&state.orm).await? {
        Some(_) => Ok(id),
        None => Err(AppError::bad_request(format!("invalid product: {id}"))),
    }
}

fn price(raw: &str) -> AppResult<String> {
    normalize_price(raw).ok_or_else(|| AppError::bad_request(format!("invalid price: {raw}")))
}
