use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    dto::{SetActiveRequest, extras::ExtraRequest},
    entity::extras::{self, ActiveModel as ExtraActive, Entity as Extras, ExtraCategoryType},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Extra,
    money::normalize_price,
    response::{ApiResponse, Meta},
    routes::params::{ExtraQuery, active_filter},
    state::AppState,
};

pub async fn list_extras(state: &AppState, query: ExtraQuery) -> AppResult<ApiResponse<Vec<Extra>>> {
    let mut finder = Extras::find();
    if let Some(raw) = query.category_type.as_deref().filter(|r| !r.trim().is_empty()) {
        finder = finder.filter(extras::Column::CategoryType.eq(category_type(raw)?));
    }
    if let Some(active) = active_filter(
        query.include_inactive.as_deref(),
        query.is_active.as_deref(),
    ) {
        finder = finder.filter(extras::Column::IsActive.eq(active));
    }

    let items: Vec<Extra> = finder
        .order_by_asc(extras::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Extra::from)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Extras", items, Some(meta)))
}

pub async fn get_extra(
    state: &AppState,
    id: i32,
    include_inactive: bool,
) -> AppResult<ApiResponse<Extra>> {
    match Extras::find_by_id(id).one(&state.orm).await? {
        Some(e) if include_inactive || e.is_active => Ok(ApiResponse::success("Extra", e.into(), None)),
        _ => Err(AppError::NotFound),
    }
}

pub async fn create_extra(
    state: &AppState,
    user: &AuthUser,
    payload: ExtraRequest,
) -> AppResult<ApiResponse<Extra>> {
    ensure_admin(user)?;
    let name = match payload.name.filter(|n| !n.is_empty()) {
        Some(n) => n,
        None => return Err(AppError::bad_request("name required")),
    };
    let price = match payload.price {
        Some(raw) => price(&raw)?,
        None => return Err(AppError::bad_request("price required")),
    };
    let kind = match payload.category_type.as_deref() {
        Some(raw) => category_type(raw)?,
        None => ExtraCategoryType::General,
    };

    let extra = ExtraActive {
        name: Set(name),
        price: Set(price),
        category_type: Set(kind),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(extra_id = extra.id, admin = %user.username, "extra created");

    Ok(ApiResponse::success(
        "Extra created",
        extra.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_extra(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: ExtraRequest,
) -> AppResult<ApiResponse<Extra>> {
    ensure_admin(user)?;
    let existing = match Extras::find_by_id(id).one(&state.orm).await? {
        Some(e) => e,
        None => return Err(AppError::NotFound),
    };

    let mut active: ExtraActive = existing.into();
    if let Some(name) = payload.name {
        if name.is_empty() {
            return Err(AppError::bad_request("name cannot be empty"));
        }
        active.name = Set(name);
    }
    if let Some(raw) = payload.price {
        active.price = Set(price(&raw)?);
    }
    if let Some(raw) = payload.category_type.as_deref() {
        active.category_type = Set(category_type(raw)?);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    let extra = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        extra.into(),
        Some(Meta::empty()),
    ))
}

pub async fn set_extra_active(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: SetActiveRequest,
) -> AppResult<ApiResponse<Extra>> {
    ensure_admin(user)?;
    let is_active = payload
        .is_active
        .ok_or_else(|| AppError::bad_request("is_active required"))?;
    update_extra(
        state,
        user,
        id,
        ExtraRequest {
            is_active: Some(is_active),
            ..Default::default()
        },
    )
    .await
}

pub async fn delete_extra(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Extra>> {
    ensure_admin(user)?;
    let existing = match Extras::find_by_id(id).one(&state.orm).await? {
        Some(e) => e,
        None => return Err(AppError::NotFound),
    };

    existing.clone().delete(&state.orm).await?;
    tracing::info!(extra_id = id, admin = %user.username, "extra deleted");

    Ok(ApiResponse::success(
        "Deleted",
        existing.into(),
        Some(Meta::empty()),
    ))
}

fn category_type(raw: &str) -> AppResult<ExtraCategoryType> {
    ExtraCategoryType::parse(raw).ok_or_else(|| {
        let valid: Vec<&str> = ExtraCategoryType::ALL.iter().map(|k| k.as_str()).collect();
        AppError::bad_request(format!(
            "invalid category_type: {raw}. Valid values: {}",
            valid.join(", ")
        ))
    })
}

fn price(raw: &str) -> AppResult<String> {
    normalize_price(raw).ok_or_else(|| AppError::bad_request(format!("invalid price: {raw}")))
}
