mod common;

use axum::http::StatusCode;
use jewelry_store_api::{
    dto::{
        extras::ExtraRequest,
        orders::{CreateOrderRequest, OrderItemExtraRequest, OrderItemRequest},
        variants::VariantRequest,
    },
    entity::{
        extras::ExtraCategoryType, order_item_extras::Entity as OrderItemExtras,
        order_items::Entity as OrderItems, orders::Entity as Orders, orders::OrderStatus,
    },
    error::AppError,
    services::{extra_service, order_service, product_service, variant_service},
    state::AppState,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

fn line(product_id: i32, variant_id: i32, quantity: f64) -> OrderItemRequest {
    OrderItemRequest {
        product_id: Some(f64::from(product_id)),
        variant_id: Some(f64::from(variant_id)),
        quantity: Some(quantity),
        extras: None,
    }
}

fn order(items: Vec<OrderItemRequest>) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_name: Some("Ana".into()),
        customer_email: Some("ana@example.com".into()),
        items: Some(items),
        ..Default::default()
    }
}

fn rejection(err: AppError) -> String {
    match err {
        AppError::BadRequest(message) => message,
        other => panic!("expected a 400, got {other:?}"),
    }
}

async fn row_counts(state: &AppState) -> anyhow::Result<(u64, u64, u64)> {
    Ok((
        Orders::find().count(&state.orm).await?,
        OrderItems::find().count(&state.orm).await?,
        OrderItemExtras::find().count(&state.orm).await?,
    ))
}

#[tokio::test]
async fn order_total_includes_lines_and_extras() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;

    let mut item = line(catalog.ring.id, catalog.size_7.id, 2.0);
    item.extras = Some(vec![OrderItemExtraRequest {
        extra_id: Some(f64::from(catalog.engraving.id)),
        quantity: None,
    }]);

    let resp = order_service::create_order(&state, order(vec![item])).await?;
    assert_eq!(resp.message, "Order created");

    let detail = resp.data.expect("order detail");
    assert_eq!(detail.order.total, "1150.00");
    assert_eq!(detail.order.status, OrderStatus::Pending);
    assert_eq!(detail.order.customer_name, "Ana");
    assert_eq!(detail.items.len(), 1);

    let first = &detail.items[0];
    assert_eq!(first.item.quantity, 2);
    assert_eq!(first.item.unit_price, "500.00");
    assert_eq!(first.item.product_name, "Anillo Solitario");
    assert_eq!(first.item.variant_name.as_deref(), Some("Talla 7"));
    assert_eq!(first.extras.len(), 1);
    assert_eq!(first.extras[0].quantity, 1);
    assert_eq!(first.extras[0].unit_price, "150.00");
    assert_eq!(first.extras[0].extra_name, "Grabado");
    assert_eq!(first.extras[0].category_type, ExtraCategoryType::Servicio);

    assert_eq!(row_counts(&state).await?, (1, 1, 1));
    Ok(())
}

#[tokio::test]
async fn fractional_prices_sum_to_two_decimals() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    let charm = common::variant(&state, catalog.ring.id, "Charm", "19.99").await?;

    let resp = order_service::create_order(&state, order(vec![line(catalog.ring.id, charm.id, 3.0)]))
        .await?;
    assert_eq!(resp.data.expect("detail").order.total, "59.97");
    Ok(())
}

#[tokio::test]
async fn variant_of_another_product_rolls_back_everything() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    let necklace = common::product(&state, catalog.category.id, "Collar", None).await?;
    let chain = common::variant(&state, necklace.id, "45 cm", "650.00").await?;

    let items = vec![
        line(catalog.ring.id, catalog.size_7.id, 1.0),
        line(catalog.ring.id, chain.id, 1.0),
    ];
    let err = order_service::create_order(&state, order(items))
        .await
        .expect_err("mismatched variant must fail");
    assert_eq!(
        rejection(err),
        format!("invalid variant for product {}", catalog.ring.id)
    );

    assert_eq!(row_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[tokio::test]
async fn unknown_extra_rolls_back_earlier_lines() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;

    let mut second = line(catalog.ring.id, catalog.size_7.id, 1.0);
    second.extras = Some(vec![OrderItemExtraRequest {
        extra_id: Some(9999.0),
        quantity: Some(1.0),
    }]);
    let items = vec![line(catalog.ring.id, catalog.size_7.id, 1.0), second];

    let err = order_service::create_order(&state, order(items))
        .await
        .expect_err("unknown extra must fail");
    assert_eq!(rejection(err), "invalid extra: 9999");
    assert_eq!(row_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[tokio::test]
async fn missing_customer_or_items_is_rejected() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let err = order_service::create_order(&state, order(vec![]))
        .await
        .expect_err("empty items");
    assert_eq!(rejection(err), "items required");

    let no_items = CreateOrderRequest {
        customer_name: Some("Ana".into()),
        ..Default::default()
    };
    let err = order_service::create_order(&state, no_items)
        .await
        .expect_err("absent items");
    assert_eq!(rejection(err), "items required");

    let nameless = CreateOrderRequest {
        customer_name: Some(String::new()),
        items: Some(vec![OrderItemRequest::default()]),
        ..Default::default()
    };
    let err = order_service::create_order(&state, nameless)
        .await
        .expect_err("empty name");
    assert_eq!(rejection(err), "customer_name required");

    assert_eq!(row_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[tokio::test]
async fn missing_references_are_rejected() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;

    let mut no_product = line(catalog.ring.id, catalog.size_7.id, 1.0);
    no_product.product_id = None;
    let err = order_service::create_order(&state, order(vec![no_product]))
        .await
        .expect_err("no product");
    assert_eq!(rejection(err), "product_id required in items");

    let mut no_variant = line(catalog.ring.id, catalog.size_7.id, 1.0);
    no_variant.variant_id = Some(0.0);
    let err = order_service::create_order(&state, order(vec![no_variant]))
        .await
        .expect_err("no variant");
    assert_eq!(rejection(err), "variant_id required in items");

    let err = order_service::create_order(&state, order(vec![line(4242, catalog.size_7.id, 1.0)]))
        .await
        .expect_err("unknown product");
    assert_eq!(rejection(err), "invalid product: 4242");

    let mut no_extra = line(catalog.ring.id, catalog.size_7.id, 1.0);
    no_extra.extras = Some(vec![OrderItemExtraRequest::default()]);
    let err = order_service::create_order(&state, order(vec![no_extra]))
        .await
        .expect_err("no extra id");
    assert_eq!(rejection(err), "extra_id required in extras");

    assert_eq!(row_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[tokio::test]
async fn non_positive_quantities_are_rejected() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;

    for bad in [0.0, -1.0, 2.5] {
        let err = order_service::create_order(
            &state,
            order(vec![line(catalog.ring.id, catalog.size_7.id, bad)]),
        )
        .await
        .expect_err("bad line quantity");
        assert_eq!(rejection(err), "invalid quantity");

        let mut item = line(catalog.ring.id, catalog.size_7.id, 1.0);
        item.extras = Some(vec![OrderItemExtraRequest {
            extra_id: Some(f64::from(catalog.engraving.id)),
            quantity: Some(bad),
        }]);
        let err = order_service::create_order(&state, order(vec![item]))
            .await
            .expect_err("bad extra quantity");
        assert_eq!(rejection(err), "invalid quantity in extras");
    }

    assert_eq!(row_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[tokio::test]
async fn stored_lines_keep_their_snapshot() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    let admin = common::admin_user();

    let created = order_service::create_order(
        &state,
        order(vec![line(catalog.ring.id, catalog.size_7.id, 1.0)]),
    )
    .await?
    .data
    .expect("detail");

    variant_service::update_variant(
        &state,
        &admin,
        catalog.size_7.id,
        VariantRequest {
            price: Some("900".into()),
            ..Default::default()
        },
    )
    .await?;

    let repriced = order_service::load_order_detail(&state.orm, created.order.id)
        .await?
        .expect("order");
    assert_eq!(repriced.order.total, "500.00");
    assert_eq!(repriced.items[0].item.unit_price, "500.00");

    product_service::delete_product(&state, &admin, catalog.ring.id).await?;

    let orphaned = order_service::load_order_detail(&state.orm, created.order.id)
        .await?
        .expect("order");
    let kept = &orphaned.items[0].item;
    assert_eq!(kept.product_id, None);
    assert_eq!(kept.variant_id, None);
    assert_eq!(kept.product_name, "Anillo Solitario");
    assert_eq!(kept.variant_name.as_deref(), Some("Talla 7"));
    assert_eq!(kept.unit_price, "500.00");
    Ok(())
}

#[tokio::test]
async fn concurrent_orders_are_independent() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;

    let good = order(vec![line(catalog.ring.id, catalog.size_7.id, 1.0)]);
    let bad = order(vec![
        line(catalog.ring.id, catalog.size_7.id, 1.0),
        line(catalog.ring.id, 777, 1.0),
    ]);
    let other = order(vec![line(catalog.ring.id, catalog.size_7.id, 3.0)]);

    let (good, bad, other) = tokio::join!(
        order_service::create_order(&state, good),
        order_service::create_order(&state, bad),
        order_service::create_order(&state, other),
    );

    let good = good?.data.expect("detail");
    let other = other?.data.expect("detail");
    assert!(bad.is_err());
    assert_ne!(good.order.id, other.order.id);
    assert_eq!(good.order.total, "500.00");
    assert_eq!(other.order.total, "1500.00");

    assert_eq!(row_counts(&state).await?, (2, 2, 0));
    Ok(())
}

#[tokio::test]
async fn post_orders_accepts_loose_json() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;

    let body = json!({
        "customerName": "  Ana  ",
        "items": [{
            "productId": catalog.ring.id.to_string(),
            "variantId": catalog.size_7.id,
            "quantity": "2",
            "extras": [{ "extraId": catalog.engraving.id }]
        }]
    });
    let (status, body) =
        common::send(&state, common::json_request("POST", "/orders", body, None)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Order created");
    assert_eq!(body["data"]["customer_name"], "Ana");
    assert_eq!(body["data"]["total"], "1150.00");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["items"][0]["extras"][0]["category_type"], "servicio");
    Ok(())
}

#[tokio::test]
async fn post_orders_reports_validation_as_400() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let (status, body) = common::send(
        &state,
        common::json_request("POST", "/orders", json!({ "customer_name": "Ana", "items": [] }), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "items required");

    let malformed = axum::http::Request::builder()
        .method("POST")
        .uri("/orders")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))?;
    let (status, _) = common::send(&state, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(row_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[tokio::test]
async fn order_lines_are_listed_per_order() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;

    let mut item = line(catalog.ring.id, catalog.size_7.id, 1.0);
    item.extras = Some(vec![OrderItemExtraRequest {
        extra_id: Some(f64::from(catalog.engraving.id)),
        quantity: Some(2.0),
    }]);
    let first = order_service::create_order(&state, order(vec![item]))
        .await?
        .data
        .expect("detail");
    order_service::create_order(&state, order(vec![line(catalog.ring.id, catalog.size_7.id, 1.0)]))
        .await?;

    let token = common::admin_token(&state);
    let (code, body) = common::send(
        &state,
        common::get(&format!("/order-items?orderId={}", first.order.id), Some(&token)),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    let line_id = body["data"][0]["id"].as_i64().expect("line id");

    let (_, body) = common::send(
        &state,
        common::get(&format!("/order-item-extras?order_item_id={line_id}"), Some(&token)),
    )
    .await;
    assert_eq!(body["data"][0]["quantity"], 2);
    assert_eq!(body["data"][0]["extra_name"], "Grabado");

    let (code, _) = common::send(&state, common::get("/order-items", None)).await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn extra_and_variant_changes_leave_snapshots_alone() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let catalog = common::seed_ring(&state).await?;
    let admin = common::admin_user();

    let mut item = line(catalog.ring.id, catalog.size_7.id, 2.0);
    item.extras = Some(vec![OrderItemExtraRequest {
        extra_id: Some(f64::from(catalog.engraving.id)),
        quantity: Some(1.0),
    }]);
    let created = order_service::create_order(&state, order(vec![item]))
        .await?
        .data
        .expect("detail");
    assert_eq!(created.order.total, "1150.00");

    extra_service::update_extra(
        &state,
        &admin,
        catalog.engraving.id,
        ExtraRequest {
            name: Some("Grabado premium".into()),
            price: Some("300".into()),
            ..Default::default()
        },
    )
    .await?;

    let edited = order_service::load_order_detail(&state.orm, created.order.id)
        .await?
        .expect("order");
    let extra = &edited.items[0].extras[0];
    assert_eq!(extra.extra_id, Some(catalog.engraving.id));
    assert_eq!(extra.extra_name, "Grabado");
    assert_eq!(extra.unit_price, "150.00");
    assert_eq!(edited.order.total, "1150.00");

    extra_service::delete_extra(&state, &admin, catalog.engraving.id).await?;
    variant_service::delete_variant(&state, &admin, catalog.size_7.id).await?;

    let detail = order_service::load_order_detail(&state.orm, created.order.id)
        .await?
        .expect("order");
    assert_eq!(detail.order.total, "1150.00");

    let kept = &detail.items[0];
    assert_eq!(kept.item.product_id, Some(catalog.ring.id));
    assert_eq!(kept.item.variant_id, None);
    assert_eq!(kept.item.variant_name.as_deref(), Some("Talla 7"));
    assert_eq!(kept.item.unit_price, "500.00");
    assert_eq!(kept.item.quantity, 2);

    assert_eq!(kept.extras.len(), 1);
    assert_eq!(kept.extras[0].extra_id, None);
    assert_eq!(kept.extras[0].extra_name, "Grabado");
    assert_eq!(kept.extras[0].unit_price, "150.00");
    assert_eq!(kept.extras[0].category_type, ExtraCategoryType::Servicio);

    assert_eq!(row_counts(&state).await?, (1, 1, 1));
    Ok(())
}
