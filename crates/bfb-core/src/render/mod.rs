//! Pure projections from backend records to display models.
//!
//! Nothing here performs I/O. Every function takes the records from one
//! fetch and returns a complete replacement for what a page shows.

mod badge;
mod kpi;
mod surface;
mod tables;

pub use badge::{Badge, BadgeStyle};
pub use kpi::{
    KpiField, KpiView, Series, SeriesPoint, render_inventory_series, render_order_series,
    render_panel,
};
pub use surface::{Surface, View};
pub use tables::{
    InventoryRow, OrderRow, References, SiteRow, render_inventory, render_orders, render_sites,
};
