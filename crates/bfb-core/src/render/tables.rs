// ── Table rows for orders, inventory and sites ──

use bfb_api::{InventoryLine, Material, Order, Site, Supplier};
use serde::Serialize;

use super::badge::Badge;
use super::surface::View;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRow {
    pub order_id: u64,
    pub material: String,
    pub supplier: String,
    pub site: String,
    pub quantity: Option<i64>,
    pub eta: Option<String>,
    pub badge: Badge,
    pub delay_reason: Option<String>,
    pub delivered_at: Option<String>,
}

impl From<&Order> for OrderRow {
    fn from(o: &Order) -> Self {
        Self {
            order_id: o.order_id,
            material: o.material_name.clone(),
            supplier: o.supplier_name.clone().unwrap_or_default(),
            site: o.site_name.clone(),
            quantity: o.quantity,
            eta: o.eta.clone(),
            badge: Badge::from_status(&o.status),
            delay_reason: o.delay_reason.clone().filter(|r| !r.is_empty()),
            delivered_at: o.delivered_at.clone(),
        }
    }
}

/// An inventory line with its `+` and `-` targets already computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    pub inventory_id: u64,
    pub material: String,
    pub site: String,
    pub qty: i64,
    pub low_threshold: Option<i64>,
    pub badge: Badge,
    pub increment_to: i64,
    pub decrement_to: i64,
}

impl From<&InventoryLine> for InventoryRow {
    fn from(line: &InventoryLine) -> Self {
        Self {
            inventory_id: line.inventory_id,
            material: line.material_name.clone(),
            site: line.site_name.clone(),
            qty: line.qty,
            low_threshold: line.low_threshold,
            badge: Badge::from_status(&line.status),
            increment_to: line.qty.saturating_add(1),
            decrement_to: line.qty.saturating_sub(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteRow {
    pub site_id: u64,
    pub name: String,
    pub badge: Badge,
}

impl From<&Site> for SiteRow {
    fn from(site: &Site) -> Self {
        Self {
            site_id: site.site_id,
            name: site.site_name.clone(),
            badge: Badge::from_status(&site.status),
        }
    }
}

/// Choices offered by the new-order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct References {
    pub materials: Vec<Material>,
    pub suppliers: Vec<Supplier>,
    pub sites: Vec<Site>,
}

pub fn render_orders(orders: &[Order]) -> View<OrderRow> {
    View::from_rows(orders.iter().map(OrderRow::from).collect())
}

pub fn render_inventory(lines: &[InventoryLine]) -> View<InventoryRow> {
    View::from_rows(lines.iter().map(InventoryRow::from).collect())
}

pub fn render_sites(sites: &[Site]) -> View<SiteRow> {
    View::from_rows(sites.iter().map(SiteRow::from).collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::render::BadgeStyle;

    fn line(id: u64, qty: i64, status: &str) -> InventoryLine {
        InventoryLine {
            inventory_id: id,
            site_id: 1,
            site_name: "North".into(),
            material_id: 2,
            material_name: "Cement".into(),
            qty,
            low_threshold: Some(10),
            status: status.into(),
        }
    }

    #[test]
    fn inventory_rows_precompute_step_targets() {
        let view = render_inventory(&[line(3, 5, "LOW"), line(4, 0, "REORDER")]);
        let rows = view.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].increment_to, rows[0].decrement_to), (6, 4));
        assert_eq!((rows[1].increment_to, rows[1].decrement_to), (1, -1));
        assert_eq!(rows[1].badge.style, BadgeStyle::Critical);
    }

    #[test]
    fn rows_follow_backend_order() {
        let view = render_inventory(&[line(9, 1, "LOW"), line(2, 50, "OK"), line(5, 3, "LOW")]);
        let ids: Vec<_> = view.rows().iter().map(|r| r.inventory_id).collect();
        assert_eq!(ids, [9, 2, 5]);
    }

    #[test]
    fn delivered_order_row_keeps_literal_text() {
        let order = Order {
            order_id: 7,
            material_id: 1,
            material_name: "Rebar".into(),
            supplier_id: Some(2),
            supplier_name: Some("Acme".into()),
            site_id: 3,
            site_name: "North".into(),
            quantity: Some(40),
            eta: Some("2025-11-30".into()),
            status: "DELIVERED".into(),
            delivered_at: Some("2025-11-29".into()),
            delay_reason: Some(String::new()),
        };
        let row = OrderRow::from(&order);
        assert_eq!(row.badge.style, BadgeStyle::Success);
        assert_eq!(row.badge.text, "DELIVERED");
        assert_eq!(row.delay_reason, None);
    }

    #[test]
    fn empty_collections_render_empty() {
        assert!(render_orders(&[]).is_empty());
        assert!(render_sites(&[]).is_empty());
    }
}
