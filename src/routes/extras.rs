use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::extras::ExtraRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Extra,
    response::ApiResponse,
    routes::params::{ExtraQuery, IdPath},
    services::extra_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_extras).post(create_extra))
        .route(
            "/{id}",
            get(get_extra)
                .put(update_extra)
                .patch(update_extra)
                .delete(delete_extra),
        )
}

#[utoipa::path(
    get,
    path = "/extras",
    params(ExtraQuery),
    responses((status = 200, description = "List extras", body = ApiResponse<Vec<Extra>>)),
    tag = "Extras"
)]
pub async fn list_extras(
    State(state): State<AppState>,
    Query(query): Query<ExtraQuery>,
) -> AppResult<Json<ApiResponse<Vec<Extra>>>> {
    let resp = extra_service::list_extras(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/extras/{id}",
    params(("id" = i32, Path, description = "Extra ID")),
    responses(
        (status = 200, description = "Get extra", body = ApiResponse<Extra>),
        (status = 404, description = "Extra not found or inactive"),
    ),
    tag = "Extras"
)]
pub async fn get_extra(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Extra>>> {
    let resp = extra_service::get_extra(&state, id, false).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/extras",
    request_body = ExtraRequest,
    responses(
        (status = 201, description = "Create extra", body = ApiResponse<Extra>),
        (status = 400, description = "Invalid input"),
    ),
    security(("bearer_auth" = [])),
    tag = "Extras"
)]
pub async fn create_extra(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ExtraRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Extra>>)> {
    let Json(payload) = payload?;
    let resp = extra_service::create_extra(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/extras/{id}",
    params(("id" = i32, Path, description = "Extra ID")),
    request_body = ExtraRequest,
    responses(
        (status = 200, description = "Updated extra", body = ApiResponse<Extra>),
        (status = 404, description = "Extra not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Extras"
)]
pub async fn update_extra(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    payload: Result<Json<ExtraRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Extra>>> {
    let Json(payload) = payload?;
    let resp = extra_service::update_extra(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/extras/{id}",
    params(("id" = i32, Path, description = "Extra ID")),
    responses(
        (status = 200, description = "Deleted extra", body = ApiResponse<Extra>),
        (status = 404, description = "Extra not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Extras"
)]
pub async fn delete_extra(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Extra>>> {
    let resp = extra_service::delete_extra(&state, &user, id).await?;
    Ok(Json(resp))
}
