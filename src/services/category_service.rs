use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::{
    dto::{SetActiveRequest, categories::CategoryRequest},
    entity::{
        categories::{self, ActiveModel as CategoryActive, Entity as Categories},
        products::{self, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, CategoryDetail, CategoryList, CategoryWithImage, Product},
    response::{ApiResponse, Meta},
    routes::params::{CategoryQuery, active_filter, parse_bool},
    state::AppState,
};

pub async fn list_categories(
    state: &AppState,
    query: CategoryQuery,
) -> AppResult<ApiResponse<CategoryList>> {
    if parse_bool(query.include_representative.as_deref()) {
        let items = categories_with_images(state).await?;
        let meta = Meta::count(items.len());
        return Ok(ApiResponse::success(
            "Categories",
            CategoryList::WithImages(items),
            Some(meta),
        ));
    }

    let mut finder = Categories::find();
    if let Some(active) = active_filter(
        query.include_inactive.as_deref(),
        query.is_active.as_deref(),
    ) {
        finder = finder.filter(categories::Column::IsActive.eq(active));
    }

    let items: Vec<Category> = finder
        .order_by_asc(categories::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success(
        "Categories",
        CategoryList::Plain(items),
        Some(meta),
    ))
}

/// Active categories, each with the image of its first active product in
/// featured order.
async fn categories_with_images(state: &AppState) -> AppResult<Vec<CategoryWithImage>> {
    let categories = Categories::find()
        .filter(categories::Column::IsActive.eq(true))
        .order_by_asc(categories::Column::Name)
        .all(&state.orm)
        .await?;

    let ids: Vec<i32> = categories.iter().map(|c| c.id).collect();
    let candidates = Products::find()
        .filter(products::Column::CategoryId.is_in(ids))
        .filter(products::Column::IsActive.eq(true))
        .filter(products::Column::ImageUrl.is_not_null())
        .filter(products::Column::ImageUrl.ne(""))
        .order_by_desc(products::Column::IsFeatured)
        .order_by_asc(products::Column::FeaturedRank)
        .order_by_asc(products::Column::Id)
        .all(&state.orm)
        .await?;

    let mut images: HashMap<i32, String> = HashMap::new();
    for product in candidates {
        if let Some(url) = product.image_url {
            images.entry(product.category_id).or_insert(url);
        }
    }

    Ok(categories
        .into_iter()
        .map(|c| CategoryWithImage {
            representative_image_url: images.remove(&c.id),
            id: c.id,
            name: c.name,
            is_active: c.is_active,
        })
        .collect())
}

/// Public reads hide inactive categories; admin reads pass `include_inactive`.
pub async fn get_category(
    state: &AppState,
    id: i32,
    include_inactive: bool,
) -> AppResult<ApiResponse<CategoryDetail>> {
    let category = match Categories::find_by_id(id).one(&state.orm).await? {
        Some(c) if include_inactive || c.is_active => c,
        _ => return Err(AppError::NotFound),
    };

    let products = category
        .find_related(Products)
        .order_by_asc(products::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::success(
        "Category",
        CategoryDetail {
            category: category.into(),
            products,
        },
        None,
    ))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let name = match payload.name.filter(|n| !n.is_empty()) {
        Some(n) => n,
        None => return Err(AppError::bad_request("name required")),
    };

    let category = CategoryActive {
        name: Set(name),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(category_id = category.id, admin = %user.username, "category created");

    Ok(ApiResponse::success(
        "Category created",
        category.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let existing = match Categories::find_by_id(id).one(&state.orm).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: CategoryActive = existing.into();
    if let Some(name) = payload.name {
        if name.is_empty() {
            return Err(AppError::bad_request("name cannot be empty"));
        }
        active.name = Set(name);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    let category = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        category.into(),
        Some(Meta::empty()),
    ))
}

pub async fn set_category_active(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: SetActiveRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let is_active = payload
        .is_active
        .ok_or_else(|| AppError::bad_request("is_active required"))?;
    update_category(
        state,
        user,
        id,
        CategoryRequest {
            name: None,
            is_active: Some(is_active),
        },
    )
    .await
}

/// Returns the deleted row. Categories that still own products are refused.
pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let existing = match Categories::find_by_id(id).one(&state.orm).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let owned = Products::find()
        .filter(products::Column::CategoryId.eq(id))
        .count(&state.orm)
        .await?;
    if owned > 0 {
        return Err(AppError::bad_request(format!(
            "category {id} still has {owned} products"
        )));
    }

    existing.clone().delete(&state.orm).await?;
    tracing::info!(category_id = id, admin = %user.username, "category deleted");

    Ok(ApiResponse::success(
        "Deleted",
        existing.into(),
        Some(Meta::empty()),
    ))
}
