//! Table projections of rendered rows, shared by list, page and watch output.

use tabled::Tabled;

use bfb_core::render::{InventoryRow, OrderRow, SiteRow};
use bfb_core::{Material, Supplier};

use crate::cli::GlobalOpts;
use crate::output;

fn or_dash(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

// ── Orders ──────────────────────────────────────────────────────────

#[derive(Tabled)]
struct OrderTable {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Material")]
    material: String,
    #[tabled(rename = "Supplier")]
    supplier: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "ETA")]
    eta: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl OrderTable {
    fn new(row: &OrderRow, color: bool) -> Self {
        let note = match (&row.delay_reason, &row.delivered_at) {
            (Some(reason), _) => reason.clone(),
            (None, Some(at)) => format!("delivered {at}"),
            (None, None) => String::new(),
        };
        Self {
            id: row.order_id,
            material: row.material.clone(),
            supplier: row.supplier.clone(),
            site: row.site.clone(),
            quantity: or_dash(row.quantity),
            eta: or_dash(row.eta.as_deref()),
            status: output::paint_badge(&row.badge, color),
            note,
        }
    }
}

pub fn orders(rows: &[OrderRow], global: &GlobalOpts) -> String {
    let color = output::should_color(global.color);
    output::render_list(
        global.output,
        rows,
        |r| OrderTable::new(r, color),
        |r| r.order_id.to_string(),
        "No orders found.",
    )
}

// ── Inventory ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InventoryTable {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Material")]
    material: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Qty")]
    qty: i64,
    #[tabled(rename = "Low At")]
    threshold: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn inventory(rows: &[InventoryRow], global: &GlobalOpts) -> String {
    let color = output::should_color(global.color);
    output::render_list(
        global.output,
        rows,
        |r| InventoryTable {
            id: r.inventory_id,
            material: r.material.clone(),
            site: r.site.clone(),
            qty: r.qty,
            threshold: or_dash(r.low_threshold),
            status: output::paint_badge(&r.badge, color),
        },
        |r| r.inventory_id.to_string(),
        "No inventory found.",
    )
}

// ── Sites ───────────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteTable {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn sites(rows: &[SiteRow], global: &GlobalOpts) -> String {
    let color = output::should_color(global.color);
    output::render_list(
        global.output,
        rows,
        |r| SiteTable {
            id: r.site_id,
            name: r.name.clone(),
            status: output::paint_badge(&r.badge, color),
        },
        |r| r.site_id.to_string(),
        "No sites found.",
    )
}

// ── Reference data ──────────────────────────────────────────────────

#[derive(Tabled)]
struct MaterialTable {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Category")]
    category: String,
}

pub fn materials(materials: &[Material], global: &GlobalOpts) -> String {
    output::render_list(
        global.output,
        materials,
        |m| MaterialTable {
            id: m.material_id,
            name: m.name.clone(),
            sku: m.sku.clone(),
            category: or_dash(m.category.as_deref()),
        },
        |m| m.material_id.to_string(),
        "No materials found.",
    )
}

#[derive(Tabled)]
struct SupplierTable {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

pub fn suppliers(suppliers: &[Supplier], global: &GlobalOpts) -> String {
    output::render_list(
        global.output,
        suppliers,
        |s| SupplierTable {
            id: s.supplier_id,
            name: s.name.clone(),
            email: or_dash(s.email.as_deref()),
            phone: or_dash(s.phone.as_deref()),
        },
        |s| s.supplier_id.to_string(),
        "No suppliers found.",
    )
}
