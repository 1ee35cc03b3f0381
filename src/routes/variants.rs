use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::variants::VariantRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Variant,
    response::ApiResponse,
    routes::params::{IdPath, VariantQuery},
    services::variant_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_variants).post(create_variant))
        .route(
            "/{id}",
            get(get_variant)
                .put(update_variant)
                .patch(update_variant)
                .delete(delete_variant),
        )
}

#[utoipa::path(
    get,
    path = "/variants",
    params(VariantQuery),
    responses((status = 200, description = "List variants", body = ApiResponse<Vec<Variant>>)),
    tag = "Variants"
)]
pub async fn list_variants(
    State(state): State<AppState>,
    Query(query): Query<VariantQuery>,
) -> AppResult<Json<ApiResponse<Vec<Variant>>>> {
    let resp = variant_service::list_variants(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/variants/{id}",
    params(("id" = i32, Path, description = "Variant ID")),
    responses(
        (status = 200, description = "Get variant", body = ApiResponse<Variant>),
        (status = 404, description = "Variant not found or inactive"),
    ),
    tag = "Variants"
)]
pub async fn get_variant(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Variant>>> {
    let resp = variant_service::get_variant(&state, id, false).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/variants",
    request_body = VariantRequest,
    responses(
        (status = 201, description = "Create variant", body = ApiResponse<Variant>),
        (status = 400, description = "Invalid input"),
    ),
    security(("bearer_auth" = [])),
    tag = "Variants"
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
    put,
    path = "/variants/{id}",
    params(("id" = i32, Path, description = "Variant ID")),
    request_body = VariantRequest,
    responses(
        (status = 200, description = "Updated variant", body = ApiResponse<Variant>),
        (status = 404, description = "Variant not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Variants"
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
    path = "/variants/{id}",
    params(("id" = i32, Path, description = "Variant ID")),
    responses(
        (status = 200, description = "Deleted variant", body = ApiResponse<Variant>),
        (status = 404, description = "Variant not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Variants"
)]
pub async fn delete_variant(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Variant>>> {
    let resp = variant_service::delete_variant(&state, &user, id).await?;
    Ok(Json(resp))
}
