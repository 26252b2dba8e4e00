//! End-to-end test: a real server bound to a local port, driven over HTTP.
//!
//! Needs no external infrastructure; the store is in memory and seeded.

use actix_web::web;
use reqwest::{Client, StatusCode};
use sales_api::{build_server, InMemorySalesStore, SalesService};
use serde_json::{json, Value};
use std::time::Duration;

fn free_port() -> u16 {
    // Bind to port 0 to let the OS assign a free port, then release it.
    // There is a small TOCTOU window, but it is acceptable for test usage.
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind failed")
        .local_addr()
        .expect("addr failed")
        .port()
}

/// Wait until `url` answers, retrying every `interval` for up to `timeout`
/// total. Panics if the service never comes up.
async fn wait_for_http(label: &str, url: &str, timeout: Duration, interval: Duration) {
    let client = Client::builder()
        .timeout(Duration::from_secs(3))
        .build()
        .unwrap();
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if tokio::time::Instant::now() > deadline {
            panic!("{} did not become ready within {:?}", label, timeout);
        }
        if client.get(url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(interval).await;
    }
}

async fn start_server() -> String {
    let port = free_port();
    let service = web::Data::new(SalesService::new(InMemorySalesStore::seeded()));
    let server = build_server(service, "127.0.0.1", port).expect("Failed to bind the sales api");
    tokio::spawn(server);

    let app_url = format!("http://127.0.0.1:{}", port);
    wait_for_http(
        "sales api",
        &format!("{}/api/products", app_url),
        Duration::from_secs(10),
        Duration::from_millis(100),
    )
    .await;
    app_url
}

/// Full order flow over the wire:
///  1. Create a customer.
///  2. Place an order for it with two products.
///  3. Add, re-quantify and remove items, checking the order total each time.
///  4. Delete the order and check its items went with it.
#[tokio::test]
async fn order_lifecycle_over_http() {
    let app_url = start_server().await;
    let http = Client::new();

    // ── 1. Customer ──────────────────────────────────────────────────────────
    let resp = http
        .post(format!("{}/api/customers", app_url))
        .json(&json!({
            "first_name": "Linus",
            "last_name": "Torvalds",
            "email": "linus@example.com"
        }))
        .send()
        .await
        .expect("Failed to POST /api/customers");
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/api/customers/6")
    );
    let customer: Value = resp.json().await.expect("customer body");
    let customer_id = customer["id"].as_i64().expect("customer id");

    // ── 2. Order ─────────────────────────────────────────────────────────────
    let resp = http
        .post(format!("{}/api/orders", app_url))
        .json(&json!({
            "customer_id": customer_id,
            "order_items": [
                { "product_id": 1, "quantity": 1 },
                { "product_id": 3, "quantity": 1 }
            ]
        }))
        .send()
        .await
        .expect("Failed to POST /api/orders");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("order body");
    let order_id = order["id"].as_i64().expect("order id");
    assert_eq!(order["total_amount"], "1499.98");

    let total = |http: Client, url: String| async move {
        let order: Value = http
            .get(url)
            .send()
            .await
            .expect("Failed to GET order")
            .json()
            .await
            .expect("order body");
        order["total_amount"].as_str().map(str::to_string)
    };
    let order_url = format!("{}/api/orders/{}", app_url, order_id);

    // ── 3. Items ─────────────────────────────────────────────────────────────
    let resp = http
        .post(format!("{}/api/orderitems", app_url))
        .json(&json!({ "order_id": order_id, "product_id": 2, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to POST /api/orderitems");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Value = resp.json().await.expect("item body");
    let item_id = item["id"].as_i64().expect("item id");
    assert_eq!(
        total(http.clone(), order_url.clone()).await.as_deref(),
        Some("2299.97")
    );

    let resp = http
        .put(format!("{}/api/orderitems/{}", app_url, item_id))
        .json(&json!({ "id": item_id, "product_id": 2, "quantity": 2 }))
        .send()
        .await
        .expect("Failed to PUT /api/orderitems");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        total(http.clone(), order_url.clone()).await.as_deref(),
        Some("3099.96")
    );

    let resp = http
        .delete(format!("{}/api/orderitems/{}", app_url, item_id))
        .send()
        .await
        .expect("Failed to DELETE /api/orderitems");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        total(http.clone(), order_url.clone()).await.as_deref(),
        Some("1499.98")
    );

    // ── 4. Cascade ───────────────────────────────────────────────────────────
    let resp = http
        .delete(order_url.clone())
        .send()
        .await
        .expect("Failed to DELETE order");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = http
        .get(format!("{}/api/orderitems/order/{}", app_url, order_id))
        .send()
        .await
        .expect("Failed to GET order items");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let items: Value = http
        .get(format!("{}/api/orderitems", app_url))
        .send()
        .await
        .expect("Failed to GET /api/orderitems")
        .json()
        .await
        .expect("items body");
    assert!(items
        .as_array()
        .expect("array")
        .iter()
        .all(|i| i["order_id"].as_i64() != Some(order_id)));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app_url = start_server().await;

    let doc: Value = Client::new()
        .get(format!("{}/api-docs/openapi.json", app_url))
        .send()
        .await
        .expect("Failed to GET openapi.json")
        .json()
        .await
        .expect("openapi body");

    assert!(doc["paths"]["/api/orders/{id}"].is_object());
}
