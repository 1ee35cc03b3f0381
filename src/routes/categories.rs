use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::categories::CategoryRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Category, CategoryDetail, CategoryList},
    response::ApiResponse,
    routes::params::{CategoryQuery, IdPath},
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .patch(update_category)
                .delete(delete_category),
        )
}

#[utoipa::path(
    get,
    path = "/categories",
    params(CategoryQuery),
    responses(
        (status = 200, description = "List categories", body = ApiResponse<CategoryList>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category with its products", body = ApiResponse<CategoryDetail>),
        (status = 404, description = "Category not found or inactive"),
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<CategoryDetail>>> {
    let resp = category_service::get_category(&state, id, false).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Create category", body = ApiResponse<Category>),
        (status = 400, description = "Invalid input"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
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
    put,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = ApiResponse<Category>),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
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
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted category", body = ApiResponse<Category>),
        (status = 400, description = "Category still has products"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::delete_category(&state, &user, id).await?;
    Ok(Json(resp))
}
