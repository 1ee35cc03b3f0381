use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};

use crate::{
    dto::auth::{LoginRequest, LoginResponse},
    error::AppResult,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/admin/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Admin token", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let Json(payload) = payload?;
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}
