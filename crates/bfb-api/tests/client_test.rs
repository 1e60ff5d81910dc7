#![allow(clippy::unwrap_used)]
// Integration tests for `PortalClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bfb_api::{
    Error, InventoryPatch, Method, NewOrder, NewSite, OrderPatch, OrderStatus, PortalClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PortalClient) {
    let server = MockServer::start().await;
    let base = format!("{}/api", server.uri());
    let client = PortalClient::from_reqwest(&base, reqwest::Client::new()).unwrap();
    (server, client)
}

fn order_json(id: u64, status: &str) -> serde_json::Value {
    json!({
        "order_id": id,
        "material_id": 1,
        "material_name": "Rebar",
        "supplier_id": 2,
        "supplier_name": "Acme Steel",
        "site_id": 3,
        "site_name": "North Yard",
        "quantity": 40,
        "eta": "2025-11-30",
        "status": status,
        "delivered_at": null,
        "delay_reason": null
    })
}

// ── Generic request ─────────────────────────────────────────────────

#[tokio::test]
async fn test_request_get_has_no_content_type() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/kpi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sites": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let value = client.request("/kpi", Method::GET, None).await.unwrap();
    assert_eq!(value, json!({ "sites": {} }));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_request_with_body_sends_json() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/orders/7"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "status": "DELIVERED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Order updated" })))
        .expect(1)
        .mount(&server)
        .await;

    let body = json!({ "status": "DELIVERED" });
    let value = client
        .request("orders/7", Method::PATCH, Some(&body))
        .await
        .unwrap();
    assert_eq!(value["message"], "Order updated");
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/orders/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let value = client.request("orders/9", Method::DELETE, None).await.unwrap();
    assert!(value.is_null());

    let ack = client.delete_order(9).await.unwrap();
    assert_eq!(ack.message, "");
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_backend_error_carries_status_and_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/sites"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "site_name is required" })),
        )
        .mount(&server)
        .await;

    let result = client
        .create_site(&NewSite {
            site_name: String::new(),
            status: "WORKING".into(),
        })
        .await;

    match result {
        Err(Error::Request { status, message }) => {
            assert_eq!(status, Some(400));
            assert_eq!(message, "site_name is required");
        }
        other => panic!("expected Request error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_uses_reason_phrase() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_orders(None).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Request failed (HTTP 500): Internal Server Error");
}

#[tokio::test]
async fn test_unreachable_backend_is_request_failure_without_status() {
    let client = PortalClient::from_reqwest("http://127.0.0.1:1/api", reqwest::Client::new())
        .unwrap();

    let err = client.get_kpi().await.unwrap_err();
    assert!(err.is_transport(), "expected transport failure, got: {err:?}");
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_sites().await;
    assert!(
        matches!(&result, Err(Error::Deserialization { body, .. }) if body == "not json"),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Orders ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_orders_with_status_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(query_param("status", "DELAYED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([order_json(5, "DELAYED")])))
        .expect(1)
        .mount(&server)
        .await;

    let orders = client.list_orders(Some("DELAYED")).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id, 5);
    assert_eq!(orders[0].supplier_name.as_deref(), Some("Acme Steel"));
}

#[tokio::test]
async fn test_create_order_posts_full_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_json(json!({
            "material_id": 1,
            "supplier_id": 2,
            "site_id": 3,
            "eta": "2025-12-01",
            "quantity": 25,
            "status": "SCHEDULED"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "message": "Order created", "order_id": 12 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_order(&NewOrder {
            material_id: 1,
            supplier_id: 2,
            site_id: 3,
            eta: "2025-12-01".into(),
            quantity: 25,
            status: OrderStatus::Scheduled,
        })
        .await
        .unwrap();
    assert_eq!(created.order_id, 12);
}

#[tokio::test]
async fn test_delay_order_patch_body() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/orders/4"))
        .and(body_json(json!({
            "status": "DELAYED",
            "eta": "2025-12-10",
            "delay_reason": "Port strike"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Order updated" })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client
        .update_order(
            4,
            &OrderPatch {
                status: Some(OrderStatus::Delayed),
                eta: Some("2025-12-10".into()),
                delay_reason: Some("Port strike".into()),
                quantity: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(ack.message, "Order updated");
}

// ── Inventory & sites ───────────────────────────────────────────────

#[tokio::test]
async fn test_list_inventory_for_site() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/inventory"))
        .and(query_param("site_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "inventory_id": 3,
            "site_id": 2,
            "site_name": "South",
            "material_id": 1,
            "material_name": "Cement",
            "qty": 5,
            "low_threshold": 10,
            "status": "LOW"
        }])))
        .mount(&server)
        .await;

    let lines = client.list_inventory(Some(2)).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].qty, 5);
    assert_eq!(lines[0].low_threshold, Some(10));
    assert_eq!(lines[0].status, "LOW");
}

#[tokio::test]
async fn test_update_inventory_threshold_only() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/inventory/3"))
        .and(body_json(json!({ "low_threshold": 15 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Inventory updated" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_inventory(
            3,
            &InventoryPatch {
                low_threshold: Some(15),
                ..InventoryPatch::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_site_returns_created_site() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/sites"))
        .and(body_json(json!({ "site_name": "East Pier", "status": "WORKING" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Site created",
            "site": { "site_id": 8, "site_name": "East Pier", "status": "WORKING" }
        })))
        .mount(&server)
        .await;

    let created = client
        .create_site(&NewSite {
            site_name: "East Pier".into(),
            status: "WORKING".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.site.site_id, 8);
}

#[tokio::test]
async fn test_health_and_reference_lists() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "timestamp": "2025-11-01T10:00:00"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/materials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "material_id": 1, "name": "Cement", "sku": "CEM-01", "category": "Bulk" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/suppliers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "supplier_id": 2, "name": "Acme Steel", "email": null, "phone": "555-0100" }
        ])))
        .mount(&server)
        .await;

    assert_eq!(client.health().await.unwrap().status, "ok");
    assert_eq!(client.list_materials().await.unwrap()[0].sku, "CEM-01");
    assert_eq!(client.list_suppliers().await.unwrap()[0].email, None);
}
