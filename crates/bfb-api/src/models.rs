// Wire types for the portal backend.
//
// Status fields on fetched records stay raw strings: the backend derives
// them and the client only displays them. `OrderStatus` exists for
// outbound mutation bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Records ──────────────────────────────────────────────────────────

/// A construction site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub site_id: u64,
    pub site_name: String,
    #[serde(default)]
    pub status: String,
}

/// Stock of one material at one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub inventory_id: u64,
    pub site_id: u64,
    #[serde(default)]
    pub site_name: String,
    pub material_id: u64,
    #[serde(default)]
    pub material_name: String,
    pub qty: i64,
    #[serde(default)]
    pub low_threshold: Option<i64>,
    #[serde(default)]
    pub status: String,
}

/// A supplier order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: u64,
    pub material_id: u64,
    #[serde(default)]
    pub material_name: String,
    #[serde(default)]
    pub supplier_id: Option<u64>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    pub site_id: u64,
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub delivered_at: Option<String>,
    #[serde(default)]
    pub delay_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub material_id: u64,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// `GET /health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ── KPI snapshot ─────────────────────────────────────────────────────

/// Aggregate counts computed by the backend. Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiSnapshot {
    pub sites: SiteCounts,
    pub inventory: InventoryCounts,
    pub orders: OrderCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteCounts {
    pub total: u64,
    pub working: u64,
    pub wip: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryCounts {
    pub ok: u64,
    pub low: u64,
    pub reorder: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderCounts {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
}

impl OrderCounts {
    /// Count for `status`, or 0 when the backend omitted the key.
    pub fn count(&self, status: OrderStatus) -> u64 {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }
}

// ── Mutation bodies ──────────────────────────────────────────────────

/// Order lifecycle states accepted by `PATCH /orders/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Scheduled,
    InTransit,
    Delayed,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [Self; 4] = [
        Self::Scheduled,
        Self::InTransit,
        Self::Delayed,
        Self::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::InTransit => "IN_TRANSIT",
            Self::Delayed => "DELAYED",
            Self::Delivered => "DELIVERED",
        }
    }

    /// Human label used in charts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InTransit => "In Transit",
            Self::Delayed => "Delayed",
            Self::Delivered => "Delivered",
        }
    }
}

/// `POST /orders` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    pub material_id: u64,
    pub supplier_id: u64,
    pub site_id: u64,
    pub eta: String,
    pub quantity: i64,
    pub status: OrderStatus,
}

/// `POST /sites` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSite {
    pub site_name: String,
    pub status: String,
}

/// `PATCH /orders/{id}` body. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

/// `PATCH /inventory/{id}` body. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_threshold: Option<i64>,
}

// ── Responses ────────────────────────────────────────────────────────

/// `{ "message": "..." }` acknowledgement returned by mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

/// `POST /orders` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    #[serde(default)]
    pub message: String,
    pub order_id: u64,
}

/// `POST /sites` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCreated {
    #[serde(default)]
    pub message: String,
    pub site: Site,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn kpi_missing_keys_default_to_zero() {
        let kpi: KpiSnapshot = serde_json::from_value(json!({
            "sites": { "total": 3 },
            "orders": { "total": 1, "by_status": { "SCHEDULED": 1 } }
        }))
        .unwrap();

        assert_eq!(kpi.sites.total, 3);
        assert_eq!(kpi.sites.wip, 0);
        assert_eq!(kpi.inventory, InventoryCounts::default());
        assert_eq!(kpi.orders.count(OrderStatus::Scheduled), 1);
        assert_eq!(kpi.orders.count(OrderStatus::Delayed), 0);
    }

    #[test]
    fn order_patch_sends_only_set_fields() {
        let patch = OrderPatch {
            status: Some(OrderStatus::Delivered),
            ..OrderPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "status": "DELIVERED" })
        );
    }

    #[test]
    fn order_tolerates_null_quantity_and_eta() {
        let order: Order = serde_json::from_value(json!({
            "order_id": 4,
            "material_id": 1,
            "material_name": "Rebar",
            "supplier_id": 2,
            "supplier_name": "Acme",
            "site_id": 3,
            "site_name": "North",
            "quantity": null,
            "eta": null,
            "status": "SCHEDULED",
            "delivered_at": null,
            "delay_reason": null
        }))
        .unwrap();
        assert_eq!(order.quantity, None);
        assert_eq!(order.eta, None);
        assert_eq!(order.status, "SCHEDULED");
    }
}
