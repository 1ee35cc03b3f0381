use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use tower_http::services::ServeDir;

use crate::{
    cors::cors_layer,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod admin_catalog;
pub mod auth;
pub mod categories;
pub mod doc;
pub mod extras;
pub mod health;
pub mod order_items;
pub mod orders;
pub mod params;
pub mod products;
pub mod variants;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/variants", variants::router())
        .nest("/extras", extras::router())
        .nest("/orders", orders::router())
        .nest("/order-items", order_items::items_router())
        .nest("/order-item-extras", order_items::extras_router())
        .nest("/admin/auth", auth::router())
        .nest("/admin/catalog", admin_catalog::router())
}

/// Routes, uploaded and bundled images, docs and CORS bound to `state`. Transport layers
/// (tracing, request ids, limits) are added by the binary.
pub fn build_app(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.uploads_dir);
    let images = ServeDir::new(&state.config.images_dir);
    create_api_router()
        .nest_service("/uploads", uploads)
        .nest_service("/images", images)
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(cors_layer(&state.config))
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
