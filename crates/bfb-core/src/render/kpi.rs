// ── KPI panel and chart series ──

use bfb_api::{KpiSnapshot, OrderStatus};
use serde::Serialize;

/// One labelled number on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KpiField {
    pub label: &'static str,
    pub value: u64,
}

/// A labelled data point in a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: &'static str,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub title: &'static str,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

/// Everything derived from one KPI snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiView {
    pub panel: Vec<KpiField>,
    pub orders: Series,
    pub inventory: Series,
}

impl KpiView {
    pub fn render(kpi: &KpiSnapshot) -> Self {
        Self {
            panel: render_panel(kpi),
            orders: render_order_series(kpi),
            inventory: render_inventory_series(kpi),
        }
    }

    pub fn values(&self) -> Vec<u64> {
        self.panel.iter().map(|f| f.value).collect()
    }
}

/// The ten dashboard fields, in display order.
pub fn render_panel(kpi: &KpiSnapshot) -> Vec<KpiField> {
    let by_status = |status| kpi.orders.count(status);
    vec![
        KpiField {
            label: "Total sites",
            value: kpi.sites.total,
        },
        KpiField {
            label: "Working",
            value: kpi.sites.working,
        },
        KpiField {
            label: "WIP",
            value: kpi.sites.wip,
        },
        KpiField {
            label: "Inventory OK",
            value: kpi.inventory.ok,
        },
        KpiField {
            label: "Low",
            value: kpi.inventory.low,
        },
        KpiField {
            label: "Reorder",
            value: kpi.inventory.reorder,
        },
        KpiField {
            label: "Total orders",
            value: kpi.orders.total,
        },
        KpiField {
            label: "Scheduled",
            value: by_status(OrderStatus::Scheduled),
        },
        KpiField {
            label: "In transit",
            value: by_status(OrderStatus::InTransit),
        },
        KpiField {
            label: "Delivered",
            value: by_status(OrderStatus::Delivered),
        },
    ]
}

pub fn render_order_series(kpi: &KpiSnapshot) -> Series {
    Series {
        title: "Orders by status",
        points: OrderStatus::ALL
            .into_iter()
            .map(|status| SeriesPoint {
                label: status.label(),
                value: kpi.orders.count(status),
            })
            .collect(),
    }
}

pub fn render_inventory_series(kpi: &KpiSnapshot) -> Series {
    Series {
        title: "Inventory health",
        points: vec![
            SeriesPoint { label: "OK", value: kpi.inventory.ok },
            SeriesPoint { label: "Low", value: kpi.inventory.low },
            SeriesPoint { label: "Reorder", value: kpi.inventory.reorder },
        ],
    }
}
