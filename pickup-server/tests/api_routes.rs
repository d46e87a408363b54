//! HTTP surface: auth, routing and response envelopes

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::Duration;
use common::*;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pickup_server::auth::{JwtService, Role};
use pickup_server::core::server::build_app;
use pickup_server::utils::time;
use pickup_server::{Config, ServerState};
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN: i64 = 1;

struct TestApp {
    app: Router,
    jwt: Arc<JwtService>,
    db: TestDb,
}

impl TestApp {
    async fn new() -> Self {
        let db = setup().await;
        let config = Config::for_work_dir("unused");
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        let state = ServerState::new(config, db.pool.clone(), jwt.clone());
        Self {
            app: build_app(state),
            jwt,
            db,
        }
    }

    fn token(&self, user_id: i64, role: Role) -> String {
        self.jwt
            .generate_token(user_id, &format!("user-{user_id}"), role)
            .unwrap()
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(v) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };

        let res = self.app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let t = TestApp::new().await;
    let (status, body) = t.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn test_api_requires_bearer_token() {
    let t = TestApp::new().await;

    let (status, body) = t.send("GET", "/api/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_ne!(body["code"], 0);

    let (status, _) = t.send("GET", "/api/orders", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cart_checkout_and_order_access() {
    let t = TestApp::new().await;
    let alice = t.token(ALICE, Role::Customer);
    let bob = t.token(BOB, Role::Customer);
    let admin = t.token(ADMIN, Role::Admin);
    let p = stocked(&t.db.pool, "Cinnamon bun", 3.5, 4).await;

    let (status, body) = t
        .send(
            "POST",
            "/api/cart",
            Some(&alice),
            Some(json!({
                "product_id": p.id,
                "quantity": 2,
                "variant_selections": { "glaze": { "option_name": "Extra", "price_modifier": 0.5 } }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["quantity"], 2);

    let (_, body) = t.send("GET", "/api/cart", Some(&alice), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = t
        .send("POST", "/api/orders/checkout", Some(&alice), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let order = &body["data"];
    assert_eq!(order["pickup_number"], "001");
    assert_eq!(order["total_amount"], 8.0);
    assert_eq!(order["items"][0]["price"], 4.0);
    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(stock_of(&t.db.pool, p.id).await, Some(2));

    let (_, body) = t.send("GET", "/api/cart", Some(&alice), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (_, body) = t.send("GET", "/api/orders?limit=5", Some(&alice), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/orders/{order_id}");
    let (status, _) = t.send("GET", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = t.send("GET", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, body) = t.send("GET", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    let (status, _) = t.send("GET", "/api/orders/99999", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_rejects_selection_priced_below_zero() {
    let t = TestApp::new().await;
    let alice = t.token(ALICE, Role::Customer);
    let p = stocked(&t.db.pool, "Brownie", 4.0, 4).await;

    let (status, body) = t
        .send(
            "POST",
            "/api/cart",
            Some(&alice),
            Some(json!({
                "product_id": p.id,
                "quantity": 1,
                "variant_selections": { "size": { "option_name": "Mini", "price_modifier": -4.5 } }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    let (_, body) = t.send("GET", "/api/cart", Some(&alice), None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_status_changes_are_admin_only() {
    let t = TestApp::new().await;
    let alice = t.token(ALICE, Role::Customer);
    let admin = t.token(ADMIN, Role::Admin);
    let p = stocked(&t.db.pool, "Palmier", 2.0, 3).await;
    add_line(&t.db.pool, ALICE, p.id, 1).await;

    let (_, body) = t
        .send("POST", "/api/orders/checkout", Some(&alice), Some(json!({})))
        .await;
    let order_id = body["data"]["id"].as_i64().unwrap();
    let status_uri = format!("/api/orders/{order_id}/status");

    let (status, _) = t
        .send("PUT", &status_uri, Some(&alice), Some(json!({ "status": "preparing" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t
        .send("PUT", &status_uri, Some(&admin), Some(json!({ "status": "preparing" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "preparing");

    let (status, _) = t
        .send("POST", &format!("/api/orders/{order_id}/cancel"), Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = t
        .send("PUT", &status_uri, Some(&admin), Some(json!({ "status": "pending" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_customer_cancel_over_http() {
    let t = TestApp::new().await;
    let alice = t.token(ALICE, Role::Customer);
    let bob = t.token(BOB, Role::Customer);
    let p = stocked(&t.db.pool, "Financier", 2.0, 3).await;
    add_line(&t.db.pool, ALICE, p.id, 3).await;

    let (_, body) = t
        .send("POST", "/api/orders/checkout", Some(&alice), Some(json!({})))
        .await;
    let cancel_uri = format!("/api/orders/{}/cancel", body["data"]["id"]);
    assert_eq!(stock_of(&t.db.pool, p.id).await, Some(0));

    let (status, _) = t.send("POST", &cancel_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t.send("POST", &cancel_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");
    assert_eq!(stock_of(&t.db.pool, p.id).await, Some(3));
}

#[tokio::test]
async fn test_checkout_errors_use_envelope() {
    let t = TestApp::new().await;
    let alice = t.token(ALICE, Role::Customer);

    let (status, body) = t
        .send("POST", "/api/orders/checkout", Some(&alice), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3001);

    let (status, body) = t.send("DELETE", "/api/cart/12345", Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3002);
}

#[tokio::test]
async fn test_reservation_endpoints() {
    let t = TestApp::new().await;
    let alice = t.token(ALICE, Role::Customer);
    let admin = t.token(ADMIN, Role::Admin);
    let cake = reservable(&t.db.pool, "Sachertorte", 24.0).await;
    let tomorrow = time::date_key(time::today(chrono_tz::UTC) + Duration::days(1));

    let (status, body) = t
        .send(
            "POST",
            "/api/reservations",
            Some(&alice),
            Some(json!({ "product_id": cake.id, "quantity": 2, "reservation_date": tomorrow })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["total_amount"], 48.0);
    assert_eq!(body["data"]["status"], "pending");
    let id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = t.send("GET", "/api/reservations", Some(&alice), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let confirm_uri = format!("/api/reservations/{id}/confirm");
    let (status, _) = t.send("POST", &confirm_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t.send("POST", &confirm_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["pickup_number"], "0001");
    assert_eq!(body["data"]["origin"], "reservation");

    let (status, body) = t
        .send("DELETE", &format!("/api/reservations/{id}"), Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5003);
}

#[tokio::test]
async fn test_admin_cancels_reservation() {
    let t = TestApp::new().await;
    let alice = t.token(ALICE, Role::Customer);
    let admin = t.token(ADMIN, Role::Admin);
    let cake = reservable(&t.db.pool, "Linzer torte", 21.0).await;
    let in_two_days = time::date_key(time::today(chrono_tz::UTC) + Duration::days(2));

    let (_, body) = t
        .send(
            "POST",
            "/api/reservations",
            Some(&alice),
            Some(json!({ "product_id": cake.id, "quantity": 1, "reservation_date": in_two_days })),
        )
        .await;
    let status_uri = format!("/api/reservations/{}/status", body["data"]["id"]);

    let (status, _) = t
        .send("PUT", &status_uri, Some(&alice), Some(json!({ "status": "cancelled" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t
        .send("PUT", &status_uri, Some(&admin), Some(json!({ "status": "cancelled" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");
}
