#![allow(clippy::unwrap_used)]
// Page controller and dispatcher behaviour against a mocked backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bfb_api::{PortalClient, TransportConfig};
use bfb_core::render::BadgeStyle;
use bfb_core::{
    CoreError, Notice, NoticeLevel, Notifier, OrderForm, Outcome, PageController, PageId,
    PageState, Portal,
};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder(Mutex<Vec<Notice>>);

impl Notifier for Recorder {
    fn notify(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}

impl Recorder {
    fn notices(&self) -> Vec<Notice> {
        self.0.lock().unwrap().clone()
    }
}

fn portal(server: &MockServer, refresh: Duration) -> Portal {
    let client =
        PortalClient::new(&format!("{}/api", server.uri()), &TransportConfig::default()).unwrap();
    Portal::with_client(client, refresh)
}

fn page(server: &MockServer, id: PageId) -> (PageController, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let controller = portal(server, Duration::ZERO).page(id, recorder.clone());
    (controller, recorder)
}

async fn requests(server: &MockServer) -> Vec<(String, String)> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| (r.method.to_string(), r.url.path().to_owned()))
        .collect()
}

async fn count(server: &MockServer, verb: &str, route: &str) -> usize {
    requests(server)
        .await
        .iter()
        .filter(|(m, p)| m == verb && p == route)
        .count()
}

fn order(id: u64, status: &str) -> Value {
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

fn inventory(id: u64, qty: i64, status: &str) -> Value {
    json!({
        "inventory_id": id,
        "site_id": 3,
        "site_name": "North Yard",
        "material_id": 1,
        "material_name": "Cement",
        "qty": qty,
        "low_threshold": 10,
        "status": status
    })
}

async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_get_once(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

async fn mount_manager_reads(server: &MockServer) {
    mount_get(server, "/api/sites", json!([{ "site_id": 3, "site_name": "North Yard", "status": "WORKING" }])).await;
    mount_get(server, "/api/orders", json!([order(7, "SCHEDULED")])).await;
    mount_get(server, "/api/materials", json!([{ "material_id": 1, "name": "Cement", "sku": "CEM-01", "category": null }])).await;
    mount_get(server, "/api/suppliers", json!([{ "supplier_id": 2, "name": "Acme Steel", "email": null, "phone": null }])).await;
}

// ── Dashboard ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_dashboard_renders_kpi_panel() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/api/kpi",
        json!({
            "sites": { "total": 10, "working": 6, "wip": 4 },
            "inventory": { "ok": 5, "low": 2, "reorder": 1 },
            "orders": {
                "total": 8,
                "by_status": { "SCHEDULED": 3, "IN_TRANSIT": 2, "DELAYED": 1, "DELIVERED": 2 }
            }
        }),
    )
    .await;

    let (mut dashboard, _) = page(&server, PageId::Dashboard);
    assert_eq!(dashboard.state(), PageState::Uninitialized);
    dashboard.activate().await.unwrap();

    assert_eq!(dashboard.state(), PageState::Synced);
    let kpi = dashboard.views().kpi().unwrap();
    assert_eq!(kpi.values(), vec![10, 6, 4, 5, 2, 1, 8, 3, 2, 2]);
    assert!(!dashboard.loading().is_visible());

    // Activation happens once.
    dashboard.activate().await.unwrap();
    assert_eq!(count(&server, "GET", "/api/kpi").await, 1);
}

// ── Supplier ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_mark_delivered_patches_then_refetches_orders() {
    let server = MockServer::start().await;
    mount_get_once(&server, "/api/orders", json!([order(7, "SCHEDULED")])).await;
    mount_get(&server, "/api/orders", json!([order(7, "DELIVERED")])).await;
    Mock::given(method("PATCH"))
        .and(path("/api/orders/7"))
        .and(body_json(json!({ "status": "DELIVERED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Order updated" })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut supplier, notices) = page(&server, PageId::Supplier);
    supplier.activate().await.unwrap();
    assert_eq!(supplier.views().orders().rows()[0].badge.text, "SCHEDULED");

    supplier.dispatcher().mark_delivered(7).await.unwrap();

    assert_eq!(
        requests(&server).await,
        vec![
            ("GET".to_owned(), "/api/orders".to_owned()),
            ("PATCH".to_owned(), "/api/orders/7".to_owned()),
            ("GET".to_owned(), "/api/orders".to_owned()),
        ]
    );
    let orders = supplier.views().orders();
    let row = &orders.rows()[0];
    assert_eq!(row.badge.style, BadgeStyle::Success);
    assert_eq!(row.badge.text, "DELIVERED");
    assert_eq!(notices.notices()[0].level, NoticeLevel::Success);
    assert!(!supplier.loading().is_visible());
}

#[tokio::test]
async fn test_failed_mutation_leaves_rendered_state() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/orders", json!([order(7, "SCHEDULED")])).await;
    Mock::given(method("PATCH"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "db locked" })))
        .mount(&server)
        .await;

    let (mut supplier, notices) = page(&server, PageId::Supplier);
    supplier.activate().await.unwrap();
    let before = supplier.views().orders();

    let err = supplier.dispatcher().mark_in_transit(7).await.unwrap_err();
    assert!(matches!(err, CoreError::Request { status: Some(500), .. }));

    assert_eq!(supplier.views().orders(), before);
    assert_eq!(count(&server, "GET", "/api/orders").await, 1);
    assert!(!supplier.loading().is_visible());

    let notices = notices.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.contains("db locked"));
}

#[tokio::test]
async fn test_delay_sends_eta_and_reason() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/orders", json!([order(4, "DELAYED")])).await;
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

    let (supplier, _) = page(&server, PageId::Supplier);
    supplier
        .dispatcher()
        .delay_order(4, "2025-12-10", " Port strike ")
        .await
        .unwrap();
}

// ── Manager ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_increment_patches_next_quantity_and_rerenders_inventory() {
    let server = MockServer::start().await;
    mount_manager_reads(&server).await;
    mount_get_once(&server, "/api/inventory", json!([inventory(3, 5, "LOW")])).await;
    mount_get(&server, "/api/inventory", json!([inventory(3, 6, "LOW")])).await;
    Mock::given(method("PATCH"))
        .and(path("/api/inventory/3"))
        .and(body_json(json!({ "qty": 6 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Inventory updated" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (mut manager, _) = page(&server, PageId::Manager);
    manager.activate().await.unwrap();

    let row = manager.views().inventory().rows()[0].clone();
    assert_eq!(row.increment_to, 6);
    manager.dispatcher().increment(&row).await.unwrap();

    assert_eq!(manager.views().inventory().rows()[0].qty, 6);
    assert_eq!(count(&server, "GET", "/api/inventory").await, 2);
    // The manager page does not show the KPI panel.
    assert_eq!(count(&server, "GET", "/api/kpi").await, 0);
}

#[tokio::test]
async fn test_create_order_resyncs_orders_and_inventory() {
    let server = MockServer::start().await;
    mount_manager_reads(&server).await;
    mount_get(&server, "/api/inventory", json!([inventory(3, 5, "LOW")])).await;
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

    let (mut manager, _) = page(&server, PageId::Manager);
    manager.activate().await.unwrap();

    let refs = manager.views().references().unwrap();
    let form = OrderForm {
        material_id: Some(refs.materials[0].material_id),
        supplier_id: Some(refs.suppliers[0].supplier_id),
        site_id: Some(refs.sites[0].site_id),
        quantity: "25".into(),
        eta: "2025-12-01".into(),
    };
    let id = manager.dispatcher().create_order(&form).await.unwrap();

    assert_eq!(id, 12);
    assert_eq!(count(&server, "GET", "/api/orders").await, 2);
    assert_eq!(count(&server, "GET", "/api/inventory").await, 2);
}

#[tokio::test]
async fn test_create_site_defaults_to_working() {
    let server = MockServer::start().await;
    let north = json!({ "site_id": 3, "site_name": "North Yard", "status": "WORKING" });
    let east = json!({ "site_id": 8, "site_name": "East Pier", "status": "WORKING" });
    // Activation reads sites twice: once for the list, once for the order form.
    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([north.clone()])))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_get(&server, "/api/sites", json!([north, east.clone()])).await;
    mount_get(&server, "/api/orders", json!([])).await;
    mount_get(&server, "/api/inventory", json!([])).await;
    mount_get(&server, "/api/materials", json!([])).await;
    mount_get(&server, "/api/suppliers", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/sites"))
        .and(body_json(json!({ "site_name": "East Pier", "status": "WORKING" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Site created",
            "site": east
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut manager, _) = page(&server, PageId::Manager);
    manager.activate().await.unwrap();
    assert_eq!(manager.views().sites().rows().len(), 1);
    assert_eq!(manager.views().references().unwrap().sites.len(), 1);

    let site = manager
        .dispatcher()
        .create_site("  East Pier ", None)
        .await
        .unwrap();

    assert_eq!(site.site_id, 8);
    assert_eq!(manager.views().sites().rows().len(), 2);
    let choices: Vec<u64> = manager
        .views()
        .references()
        .unwrap()
        .sites
        .iter()
        .map(|s| s.site_id)
        .collect();
    assert_eq!(choices, vec![3, 8]);
}

#[tokio::test]
async fn test_delete_order_asks_first() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/orders", json!([])).await;
    mount_get(&server, "/api/inventory", json!([])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/orders/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Order deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let (manager, notices) = page(&server, PageId::Manager);

    let mut prompt = String::new();
    let declined = manager
        .dispatcher()
        .delete_order(5, |p| {
            prompt = p.to_owned();
            false
        })
        .await
        .unwrap();
    assert_eq!(declined, Outcome::Declined);
    assert_eq!(prompt, "Delete order #5?");
    assert!(requests(&server).await.is_empty());
    assert!(notices.notices().is_empty());

    let applied = manager.dispatcher().delete_order(5, |_| true).await.unwrap();
    assert_eq!(applied, Outcome::Applied);
    assert_eq!(count(&server, "DELETE", "/api/orders/5").await, 1);
    assert_eq!(count(&server, "GET", "/api/orders").await, 1);
    assert_eq!(count(&server, "GET", "/api/inventory").await, 1);
}

// ── Validation ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_input_never_reaches_network() {
    let server = MockServer::start().await;
    let (manager, notices) = page(&server, PageId::Manager);
    let dispatcher = manager.dispatcher();

    let results = vec![
        dispatcher.adjust_quantity(3, -1).await,
        dispatcher.delay_order(1, "", "Port strike").await,
        dispatcher.delay_order(1, "2025-12-10", "   ").await,
        dispatcher.update_eta(1, "next week").await,
        dispatcher.set_order_quantity(1, 0).await,
        dispatcher.set_low_threshold(3, -5).await,
        dispatcher.create_site("   ", Some("WIP")).await.map(drop),
    ];
    for result in results {
        assert!(result.unwrap_err().is_validation());
    }

    for quantity in ["0", "-2", "ten"] {
        let form = OrderForm {
            material_id: Some(1),
            supplier_id: Some(2),
            site_id: Some(3),
            quantity: quantity.into(),
            eta: "2025-12-01".into(),
        };
        let err = dispatcher.create_order(&form).await.unwrap_err();
        assert!(err.is_validation());
    }

    assert!(requests(&server).await.is_empty());
    assert!(!manager.loading().is_visible());
    let notices = notices.notices();
    assert_eq!(notices.len(), 10);
    assert!(notices.iter().all(|n| n.level == NoticeLevel::Error));
}

// ── Loading and empty state ─────────────────────────────────────────

#[tokio::test]
async fn test_loading_hidden_after_failed_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (mut supplier, _) = page(&server, PageId::Supplier);
    let mut loading = supplier.loading().subscribe();

    let err = supplier.activate().await.unwrap_err();
    assert!(matches!(err, CoreError::Request { status: Some(503), .. }));

    assert!(!supplier.loading().is_visible());
    assert!(!*loading.borrow_and_update());
    assert!(!supplier.views().orders().is_rendered());
    // The page still counts as activated.
    assert_eq!(supplier.state(), PageState::Synced);
}

#[tokio::test]
async fn test_empty_refetch_clears_previous_rows() {
    let server = MockServer::start().await;
    mount_get_once(
        &server,
        "/api/orders",
        json!([order(1, "SCHEDULED"), order(2, "IN_TRANSIT")]),
    )
    .await;
    mount_get(&server, "/api/orders", json!([])).await;

    let (mut supplier, _) = page(&server, PageId::Supplier);
    supplier.activate().await.unwrap();
    assert_eq!(supplier.views().orders().rows().len(), 2);
    assert!(!supplier.views().orders().empty_state_visible());

    supplier.refresh().await.unwrap();
    let orders = supplier.views().orders();
    assert!(orders.rows().is_empty());
    assert!(orders.empty_state_visible());
}

// ── Live refresh ────────────────────────────────────────────────────

#[tokio::test]
async fn test_manager_inventory_refreshes_until_dropped() {
    let server = MockServer::start().await;
    mount_manager_reads(&server).await;
    mount_get(&server, "/api/inventory", json!([inventory(3, 5, "LOW")])).await;

    let notifier = Arc::new(Recorder::default());
    let mut manager = portal(&server, Duration::from_millis(50)).page(PageId::Manager, notifier);
    manager.activate().await.unwrap();

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(count(&server, "GET", "/api/inventory").await >= 3);
    // Only inventory is live.
    assert_eq!(count(&server, "GET", "/api/sites").await, 2);

    drop(manager);
    tokio::time::sleep(Duration::from_millis(100)).await;
    let settled = count(&server, "GET", "/api/inventory").await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(count(&server, "GET", "/api/inventory").await, settled);
}

#[tokio::test]
async fn test_pages_without_live_views_do_not_poll() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/orders", json!([])).await;

    let notifier = Arc::new(Recorder::default());
    let mut supplier = portal(&server, Duration::from_millis(20)).page(PageId::Supplier, notifier);
    supplier.activate().await.unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(count(&server, "GET", "/api/orders").await, 1);
}
