use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, LoaderTrait,
    ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set, sea_query::Expr,
};

use crate::{
    dto::{SetActiveRequest, de::as_id, products::ProductRequest},
    entity::{
        categories::Entity as Categories,
        order_items::{self, Entity as OrderItems},
        products::{self, ActiveModel as ProductActive, Entity as Products, Model as ProductModel},
        variants::Entity as Variants,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Product, ProductDetail, Variant},
    response::{ApiResponse, Meta},
    routes::params::{
        BEST_SELLER_LIMIT_DEFAULT, BEST_SELLER_LIMIT_MAX, LimitQuery, ProductQuery, active_filter,
        clamp_limit, parse_bool, parse_id, positive_limit,
    },
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<Vec<ProductDetail>>> {
    let mut finder = Products::find();

    if let Some(category_id) = parse_id(query.category_id.as_deref()) {
        finder = finder.filter(products::Column::CategoryId.eq(category_id));
    }

    let featured = parse_bool(query.featured.as_deref());
    if featured {
        finder = finder
            .filter(products::Column::IsFeatured.eq(true))
            .order_by_asc(products::Column::FeaturedRank);
    }
    finder = finder.order_by_asc(products::Column::Name);

    if let Some(active) = active_filter(
        query.include_inactive.as_deref(),
        query.is_active.as_deref(),
    ) {
        finder = finder.filter(products::Column::IsActive.eq(active));
    }

    let limit = positive_limit(query.limit.as_deref());
    if let Some(limit) = limit {
        finder = finder.limit(limit);
    }

    let rows = finder.all(&state.orm).await?;
    let items = with_details(&state.orm, rows).await?;

    let meta = Meta::new(limit, items.len() as u64);
    Ok(ApiResponse::success("Products", items, Some(meta)))
}

#[derive(Debug, FromQueryResult)]
struct SalesRow {
    product_id: i32,
}

/// Products ranked by units sold across all order lines. Inactive products
/// are dropped after ranking.
pub async fn best_sellers(
    state: &AppState,
    query: LimitQuery,
) -> AppResult<ApiResponse<Vec<ProductDetail>>> {
    let limit = clamp_limit(
        query.limit.as_deref(),
        BEST_SELLER_LIMIT_DEFAULT,
        BEST_SELLER_LIMIT_MAX,
    );

    let sold = Expr::col((OrderItems, order_items::Column::Quantity)).sum();
    let ranked: Vec<i32> = OrderItems::find()
        .select_only()
        .column(order_items::Column::ProductId)
        .filter(order_items::Column::ProductId.is_not_null())
        .group_by(order_items::Column::ProductId)
        .order_by_desc(sold)
        .order_by_asc(order_items::Column::ProductId)
        .limit(limit)
        .into_model::<SalesRow>()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|row| row.product_id)
        .collect();

    if ranked.is_empty() {
        return Ok(ApiResponse::success("Best sellers", vec![], Some(Meta::new(Some(limit), 0))));
    }

    let rows = Products::find()
        .filter(products::Column::Id.is_in(ranked.clone()))
        .filter(products::Column::IsActive.eq(true))
        .all(&state.orm)
        .await?;
    let mut by_id: HashMap<i32, ProductDetail> = with_details(&state.orm, rows)
        .await?
        .into_iter()
        .map(|p| (p.product.id, p))
        .collect();

    let items: Vec<ProductDetail> = ranked.iter().filter_map(|id| by_id.remove(id)).collect();
    let meta = Meta::new(Some(limit), items.len() as u64);
    Ok(ApiResponse::success("Best sellers", items, Some(meta)))
}

pub async fn get_product(
    state: &AppState,
    id: i32,
    include_inactive: bool,
) -> AppResult<ApiResponse<ProductDetail>> {
    let product = match Products::find_by_id(id).one(&state.orm).await? {
        Some(p) if include_inactive || p.is_active => p,
        _ => return Err(AppError::NotFound),
    };

    let mut details = with_details(&state.orm, vec![product]).await?;
    let detail = details.pop().ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", detail, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: ProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let category_id = match payload.category_id {
        Some(raw) => ensure_category(&state.orm, raw).await?,
        None => return Err(AppError::bad_request("category_id required")),
    };
    let name = match payload.name.filter(|n| !n.is_empty()) {
        Some(n) => n,
        None => return Err(AppError::bad_request("name required")),
    };

    let product = ProductActive {
        category_id: Set(category_id),
        name: Set(name),
        description: Set(payload.description),
        image_url: Set(payload.image_url.filter(|u| !u.is_empty())),
        is_featured: Set(payload.is_featured.unwrap_or(false)),
        featured_rank: Set(payload.featured_rank.and_then(rank).unwrap_or(0)),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(product_id = product.id, admin = %user.username, "product created");

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: ProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = match Products::find_by_id(id).one(&state.orm).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ProductActive = existing.into();
    if let Some(raw) = payload.category_id {
        active.category_id = Set(ensure_category(&state.orm, raw).await?);
    }
    if let Some(name) = payload.name {
        if name.is_empty() {
            return Err(AppError::bad_request("name cannot be empty"));
        }
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url).filter(|u| !u.is_empty()));
    }
    if let Some(is_featured) = payload.is_featured {
        active.is_featured = Set(is_featured);
    }
    if let Some(featured_rank) = payload.featured_rank.and_then(rank) {
        active.featured_rank = Set(featured_rank);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    let product = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn set_product_active(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: SetActiveRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let is_active = payload
        .is_active
        .ok_or_else(|| AppError::bad_request("is_active required"))?;
    update_product(
        state,
        user,
        id,
        ProductRequest {
            is_active: Some(is_active),
            ..Default::default()
        },
    )
    .await
}

/// Deletes the product and its variants. Order lines keep their snapshots.
pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = match Products::find_by_id(id).one(&state.orm).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    existing.clone().delete(&state.orm).await?;
    tracing::info!(product_id = id, admin = %user.username, "product deleted");

    Ok(ApiResponse::success(
        "Deleted",
        existing.into(),
        Some(Meta::empty()),
    ))
}

/// Attaches category and variants (by id) to each product, keeping order.
async fn with_details<C>(db: &C, rows: Vec<ProductModel>) -> AppResult<Vec<ProductDetail>>
where
    C: ConnectionTrait,
{
    let categories = rows.load_one(Categories, db).await?;
    let variants = rows.load_many(Variants, db).await?;

    Ok(rows
        .into_iter()
        .zip(categories)
        .zip(variants)
        .map(|((product, category), mut variants)| {
            variants.sort_by_key(|v| v.id);
            ProductDetail {
                product: product.into(),
                category: category.map(Into::into),
                variants: variants.into_iter().map(Variant::from).collect(),
            }
        })
        .collect())
}

async fn ensure_category<C>(db: &C, raw: f64) -> AppResult<i32>
where
    C: ConnectionTrait,
{
    let id = as_id(raw).ok_or_else(|| AppError::bad_request("invalid category_id"))?;
    match Categories::find_by_id(id).one(db).await? {
        Some(_) => Ok(id),
        None => Err(AppError::bad_request(format!("invalid category: {id}"))),
    }
}

fn rank(raw: f64) -> Option<i32> {
    raw.is_finite().then(|| raw.trunc() as i32)
}
