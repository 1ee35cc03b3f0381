mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use jewelry_store_api::{
    dto::{SetActiveRequest, orders::CreateOrderRequest, orders::OrderItemRequest},
    entity::{
        extras::ExtraCategoryType,
        products::{ActiveModel as ProductActive, Entity as Products},
    },
    error::AppError,
    services::{category_service, order_service, product_service},
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde_json::{Value, json};

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("list")
        .iter()
        .filter_map(|row| row["name"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn public_listing_hides_inactive_rows() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    let hidden = common::product(&state, catalog.category.id, "Anillo Retirado", None).await?;
    let mut active: ProductActive = hidden.clone().into();
    active.is_active = Set(false);
    active.update(&state.orm).await?;

    let (code, body) = common::send(&state, common::get("/products", None)).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(names(&body), vec!["Anillo Solitario"]);
    assert_eq!(body["data"][0]["category"]["name"], "Anillos");
    assert_eq!(body["data"][0]["variants"][0]["price"], "500.00");

    let (code, _) =
        common::send(&state, common::get(&format!("/products/{}", hidden.id), None)).await;
    assert_eq!(code, StatusCode::NOT_FOUND);

    let token = common::admin_token(&state);
    let (code, body) = common::send(
        &state,
        common::get(&format!("/admin/catalog/products/{}", hidden.id), Some(&token)),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);

    let (_, body) = common::send(
        &state,
        common::get("/products?includeInactive=1&isActive=0", None),
    )
    .await;
    assert_eq!(names(&body), vec!["Anillo Retirado"]);
    Ok(())
}

#[tokio::test]
async fn featured_products_follow_rank() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    for (name, rank) in [("Collar B", 2), ("Collar A", 1)] {
        let p = common::product(&state, catalog.category.id, name, None).await?;
        let mut active: ProductActive = p.into();
        active.is_featured = Set(true);
        active.featured_rank = Set(rank);
        active.update(&state.orm).await?;
    }

    let (_, body) = common::send(&state, common::get("/products?featured=true", None)).await;
    assert_eq!(names(&body), vec!["Collar A", "Collar B"]);

    let (_, body) = common::send(&state, common::get("/products?limit=2", None)).await;
    assert_eq!(names(&body), vec!["Anillo Solitario", "Collar A"]);
    assert_eq!(body["meta"]["limit"], 2);

    let other = common::category(&state, "Aretes").await?;
    common::product(&state, other.id, "Arracadas", None).await?;
    let (_, body) = common::send(
        &state,
        common::get(&format!("/products?category_id={}", other.id), None),
    )
    .await;
    assert_eq!(names(&body), vec!["Arracadas"]);
    Ok(())
}

#[tokio::test]
async fn best_sellers_rank_by_units_sold() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    let necklace = common::product(&state, catalog.category.id, "Collar", None).await?;
    let chain = common::variant(&state, necklace.id, "45 cm", "650.00").await?;
    common::product(&state, catalog.category.id, "Sin ventas", None).await?;

    let sell = |product_id: i32, variant_id: i32, quantity: f64| CreateOrderRequest {
        customer_name: Some("Ana".into()),
        items: Some(vec![OrderItemRequest {
            product_id: Some(f64::from(product_id)),
            variant_id: Some(f64::from(variant_id)),
            quantity: Some(quantity),
            extras: None,
        }]),
        ..Default::default()
    };
    order_service::create_order(&state, sell(catalog.ring.id, catalog.size_7.id, 1.0)).await?;
    order_service::create_order(&state, sell(necklace.id, chain.id, 4.0)).await?;
    order_service::create_order(&state, sell(catalog.ring.id, catalog.size_7.id, 2.0)).await?;

    let (code, body) = common::send(&state, common::get("/products/best-sellers", None)).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(names(&body), vec!["Collar", "Anillo Solitario"]);

    let (_, body) =
        common::send(&state, common::get("/products/best-sellers?limit=1", None)).await;
    assert_eq!(names(&body), vec!["Collar"]);
    Ok(())
}

#[tokio::test]
async fn categories_can_carry_a_representative_image() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    let star = common::product(&state, catalog.category.id, "Estrella", Some("/uploads/star.jpg"))
        .await?;
    let mut active: ProductActive = star.into();
    active.is_featured = Set(true);
    active.update(&state.orm).await?;
    common::category(&state, "Vacía").await?;

    let (_, body) = common::send(
        &state,
        common::get("/categories?include_representative=true", None),
    )
    .await;
    let rows = body["data"].as_array().expect("list");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Anillos");
    assert_eq!(rows[0]["representative_image_url"], "/uploads/star.jpg");
    assert_eq!(rows[1]["representative_image_url"], Value::Null);

    let (_, body) = common::send(&state, common::get("/categories", None)).await;
    assert!(body["data"][0].get("representative_image_url").is_none());

    let (_, body) = common::send(
        &state,
        common::get(&format!("/categories/{}", catalog.category.id), None),
    )
    .await;
    let products: Vec<&str> = body["data"]["products"]
        .as_array()
        .expect("products")
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert_eq!(products, vec!["Anillo Solitario", "Estrella"]);
    Ok(())
}

#[tokio::test]
async fn category_with_products_cannot_be_deleted() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    let admin = common::admin_user();

    let err = category_service::delete_category(&state, &admin, catalog.category.id)
        .await
        .expect_err("category still owns products");
    assert!(matches!(err, AppError::BadRequest(_)));

    product_service::delete_product(&state, &admin, catalog.ring.id).await?;
    let deleted = category_service::delete_category(&state, &admin, catalog.category.id).await?;
    assert_eq!(deleted.data.expect("row").name, "Anillos");
    assert!(Products::find().all(&state.orm).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn set_active_requires_a_value() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    let admin = common::admin_user();

    let err = category_service::set_category_active(
        &state,
        &admin,
        catalog.category.id,
        SetActiveRequest::default(),
    )
    .await
    .expect_err("missing is_active");
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "is_active required"));

    let token = common::admin_token(&state);
    let (code, body) = common::send(
        &state,
        common::json_request(
            "PATCH",
            &format!("/admin/catalog/products/{}/active", catalog.ring.id),
            json!({ "isActive": "false" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);
    Ok(())
}

#[tokio::test]
async fn admin_writes_need_an_admin_token() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let body = json!({ "name": "Pulseras" });

    let (code, _) = common::send(
        &state,
        common::json_request("POST", "/admin/catalog/categories", body.clone(), None),
    )
    .await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);

    let (code, _) = common::send(
        &state,
        common::json_request("POST", "/categories", body.clone(), Some("not-a-jwt")),
    )
    .await;
    assert_eq!(code, StatusCode::FORBIDDEN);

    let token = common::admin_token(&state);
    let (code, created) = common::send(
        &state,
        common::json_request("POST", "/admin/catalog/categories", body, Some(&token)),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    assert_eq!(created["data"]["name"], "Pulseras");
    assert_eq!(created["data"]["is_active"], true);

    let cookie = Request::builder()
        .method("GET")
        .uri("/admin/catalog/categories")
        .header(header::COOKIE, format!("theme=dark; token={token}"))
        .body(Body::empty())?;
    let (code, listed) = common::send(&state, cookie).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(names(&listed), vec!["Pulseras"]);
    Ok(())
}

#[tokio::test]
async fn variant_and_extra_inputs_are_validated() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    let token = common::admin_token(&state);

    let (code, body) = common::send(
        &state,
        common::json_request(
            "POST",
            "/admin/catalog/variants",
            json!({ "productId": catalog.ring.id, "name": "Talla 8", "price": "abc" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid price: abc");

    let (code, body) = common::send(
        &state,
        common::json_request(
            "POST",
            "/admin/catalog/variants",
            json!({ "product_id": catalog.ring.id, "name": "Talla 8", "price": 520 }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    assert_eq!(body["data"]["price"], "520.00");

    let (code, body) = common::send(
        &state,
        common::json_request(
            "POST",
            "/admin/catalog/extras",
            json!({ "name": "Caja", "price": "60", "category_type": "regalo" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().starts_with("invalid category_type"));

    common::extra(&state, "Dije luna", "120.00", ExtraCategoryType::Dije).await?;
    let (_, body) = common::send(&state, common::get("/extras?category_type=dije", None)).await;
    assert_eq!(names(&body), vec!["Dije luna"]);
    let (code, _) = common::send(&state, common::get("/extras?category_type=nope", None)).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_issues_a_usable_token() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let (code, body) = common::send(
        &state,
        common::json_request(
            "POST",
            "/admin/auth/login",
            json!({ "username": common::ADMIN_USER, "password": "wrong" }),
            None,
        ),
    )
    .await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");

    let (code, _) = common::send(
        &state,
        common::json_request("POST", "/admin/auth/login", json!({ "username": "admin" }), None),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (code, body) = common::send(
        &state,
        common::json_request(
            "POST",
            "/admin/auth/login",
            json!({ "username": common::ADMIN_USER, "password": common::ADMIN_PASS }),
            None,
        ),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let (code, _) = common::send(&state, common::get("/orders", Some(&token))).await;
    assert_eq!(code, StatusCode::OK);
    Ok(())
}

fn multipart(token: &str, filename: &str, mime: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "jewelry-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/admin/catalog/uploads")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn uploaded_images_are_stored_and_served() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let token = common::admin_token(&state);
    let png = b"\x89PNG\r\n\x1a\nfake-image";

    let (code, body) = common::send(&state, multipart(&token, "Ring.PNG", "image/png", png)).await;
    assert_eq!(code, StatusCode::CREATED);
    let filename = body["data"]["filename"].as_str().expect("filename").to_string();
    assert!(filename.ends_with(".png"));
    assert_eq!(body["data"]["url"], format!("/uploads/{filename}"));
    assert_eq!(body["data"]["original_name"], "Ring.PNG");
    assert_eq!(body["data"]["size"], png.len());

    let stored = tokio::fs::read(common::uploads_dir(&state).join(&filename)).await?;
    assert_eq!(stored, png);

    let app = jewelry_store_api::routes::build_app(state.clone());
    let response = tower::ServiceExt::oneshot(
        app,
        common::get(&format!("/uploads/{filename}"), None),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let (code, body) =
        common::send(&state, multipart(&token, "notes.txt", "text/plain", b"hello")).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "unsupported image type: text/plain");

    tokio::fs::remove_dir_all(common::uploads_dir(&state)).await?;
    Ok(())
}

#[tokio::test]
async fn client_file_name_never_sets_the_stored_type() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let token = common::admin_token(&state);
    let payload = b"<script>alert(1)</script>";

    let (code, body) =
        common::send(&state, multipart(&token, "evil.html", "image/png", payload)).await;
    assert_eq!(code, StatusCode::CREATED);
    let filename = body["data"]["filename"].as_str().expect("filename").to_string();
    assert!(filename.ends_with(".png"), "{filename}");
    assert!(!filename.contains("html"));
    assert_eq!(body["data"]["original_name"], "evil.html");

    let app = jewelry_store_api::routes::build_app(state.clone());
    let response = tower::ServiceExt::oneshot(
        app,
        common::get(&format!("/uploads/{filename}"), None),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("image/png")
    );

    tokio::fs::remove_dir_all(common::uploads_dir(&state)).await?;
    Ok(())
}

#[tokio::test]
async fn bundled_images_are_served() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let dir = common::images_dir(&state);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join("hero.png"), b"\x89PNG\r\n").await?;

    let app = jewelry_store_api::routes::build_app(state.clone());
    let response = tower::ServiceExt::oneshot(app, common::get("/images/hero.png", None)).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let (code, _) = common::send(&state, common::get("/images/missing.png", None)).await;
    assert_eq!(code, StatusCode::NOT_FOUND);

    tokio::fs::remove_dir_all(dir).await?;
    Ok(())
}
