mod common;

use axum::{extract::State, http::StatusCode};
use jewelry_store_api::routes::health::health_check;

#[tokio::test]
async fn health_check_reports_database() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "up");
    Ok(())
}

#[tokio::test]
async fn unknown_path_is_json_404() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let (status, body) = common::send(&state, common::get("/nope", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/nope");
    Ok(())
}
