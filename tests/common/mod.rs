#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::Duration;
use jewelry_store_api::{
    config::AppConfig,
    db::run_migrations,
    entity::{
        categories::{self, ActiveModel as CategoryActive},
        extras::{self, ActiveModel as ExtraActive, ExtraCategoryType},
        products::{self, ActiveModel as ProductActive},
        variants::{self, ActiveModel as VariantActive},
    },
    middleware::auth::{ADMIN_ROLE, AuthUser},
    routes::build_app,
    services::auth_service::{ensure_default_admin, issue_token},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "admin123";

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "integration-secret".into(),
        jwt_expires_in: Duration::hours(1),
        admin_username: ADMIN_USER.into(),
        admin_password: ADMIN_PASS.into(),
        frontend_origins: vec!["http://localhost:5173".into()],
        uploads_dir: std::env::temp_dir().join(format!("jewelry-uploads-{}", Uuid::new_v4())),
        images_dir: std::env::temp_dir().join(format!("jewelry-images-{}", Uuid::new_v4())),
        app_env: "test".into(),
    }
}

/// Fresh in-memory database with migrations applied and the admin created.
/// A single pooled connection keeps every query on the same database.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let config = test_config();
    let mut opts = ConnectOptions::new(config.database_url.clone());
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(opts).await?;
    run_migrations(&orm).await?;
    ensure_default_admin(&orm, &config).await?;
    Ok(AppState::new(orm, config))
}

pub fn uploads_dir(state: &AppState) -> PathBuf {
    state.config.uploads_dir.clone()
}

pub fn images_dir(state: &AppState) -> PathBuf {
    state.config.images_dir.clone()
}

pub fn admin_user() -> AuthUser {
    AuthUser {
        admin_id: 1,
        role: ADMIN_ROLE.into(),
        username: ADMIN_USER.into(),
    }
}

pub fn admin_token(state: &AppState) -> String {
    issue_token(&state.config, 1, ADMIN_USER).expect("token")
}

pub async fn category(state: &AppState, name: &str) -> anyhow::Result<categories::Model> {
    Ok(CategoryActive {
        name: Set(name.into()),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?)
}

pub async fn product(
    state: &AppState,
    category_id: i32,
    name: &str,
    image_url: Option<&str>,
) -> anyhow::Result<products::Model> {
    Ok(ProductActive {
        category_id: Set(category_id),
        name: Set(name.into()),
        description: Set(None),
        image_url: Set(image_url.map(str::to_string)),
        is_featured: Set(false),
        featured_rank: Set(0),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?)
}

pub async fn variant(
    state: &AppState,
    product_id: i32,
    name: &str,
    price: &str,
) -> anyhow::Result<variants::Model> {
    Ok(VariantActive {
        product_id: Set(product_id),
        name: Set(name.into()),
        price: Set(price.into()),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?)
}

pub async fn extra(
    state: &AppState,
    name: &str,
    price: &str,
    kind: ExtraCategoryType,
) -> anyhow::Result<extras::Model> {
    Ok(ExtraActive {
        name: Set(name.into()),
        price: Set(price.into()),
        category_type: Set(kind),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?)
}

/// Ring (variant at 500.00) plus an engraving extra at 150.00.
pub struct Catalog {
    pub category: categories::Model,
    pub ring: products::Model,
    pub size_7: variants::Model,
    pub engraving: extras::Model,
}

pub async fn seed_ring(state: &AppState) -> anyhow::Result<Catalog> {
    let category = category(state, "Anillos").await?;
    let ring = product(state, category.id, "Anillo Solitario", Some("/uploads/ring.jpg")).await?;
    let size_7 = variant(state, ring.id, "Talla 7", "500.00").await?;
    let engraving = extra(state, "Grabado", "150.00", ExtraCategoryType::Servicio).await?;
    Ok(Catalog {
        category,
        ring,
        size_7,
        engraving,
    })
}

/// Runs one request through the full router and decodes the JSON body.
pub async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let app: Router = build_app(state.clone());
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}
