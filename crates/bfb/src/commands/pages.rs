//! Whole-page output for `dashboard`, `reports` and `watch`.

use std::sync::Arc;

use serde::Serialize;

use bfb_core::render::{InventoryRow, KpiField, KpiView, OrderRow, SiteRow};
use bfb_core::{PageId, Portal, ViewKind, ViewStore};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{tables, util};

/// Activate `page` once and print what it shows.
pub async fn show(portal: &Portal, page: PageId, global: &GlobalOpts) -> Result<(), CliError> {
    let mut controller = portal.page(page, util::notifier(global));
    controller.activate().await?;
    let out = render_page(page, controller.views(), global);
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Structured form of a page for JSON and YAML output.
#[derive(Serialize)]
struct PageSnapshot {
    page: PageId,
    #[serde(skip_serializing_if = "Option::is_none")]
    kpi: Option<Arc<KpiView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inventory: Option<Vec<InventoryRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sites: Option<Vec<SiteRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    orders: Option<Vec<OrderRow>>,
}

impl PageSnapshot {
    fn capture(page: PageId, views: &ViewStore) -> Self {
        Self {
            page,
            kpi: page.shows(ViewKind::Kpi).then(|| views.kpi()).flatten(),
            inventory: page
                .shows(ViewKind::Inventory)
                .then(|| views.inventory().rows().to_vec()),
            sites: page
                .shows(ViewKind::Sites)
                .then(|| views.sites().rows().to_vec()),
            orders: page
                .shows(ViewKind::Orders)
                .then(|| views.orders().rows().to_vec()),
        }
    }
}

/// Render the current contents of a page's views.
pub fn render_page(page: PageId, views: &ViewStore, global: &GlobalOpts) -> String {
    match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
            output::render_structured(global.output, &PageSnapshot::capture(page, views))
        }
        OutputFormat::Table | OutputFormat::Plain => render_sections(page, views, global),
    }
}

fn render_sections(page: PageId, views: &ViewStore, global: &GlobalOpts) -> String {
    let color = output::should_color(global.color);
    let plain = global.output == OutputFormat::Plain;
    let mut sections = Vec::new();

    match page {
        PageId::Dashboard | PageId::Reports => match views.kpi() {
            Some(kpi) if page == PageId::Dashboard => {
                sections.push(if plain {
                    plain_fields(&kpi.panel)
                } else {
                    output::kpi_table(&kpi.panel)
                });
                sections.push(output::series_chart(&kpi.orders, color));
            }
            Some(kpi) => {
                sections.push(output::series_chart(&kpi.orders, color));
                sections.push(output::series_chart(&kpi.inventory, color));
            }
            None => sections.push("No KPI data loaded.".into()),
        },
        PageId::Supplier => sections.push(tables::orders(views.orders().rows(), global)),
        PageId::Manager => {
            sections.push(tables::inventory(views.inventory().rows(), global));
            sections.push(tables::sites(views.sites().rows(), global));
            sections.push(tables::orders(views.orders().rows(), global));
        }
    }

    sections.join("\n\n")
}

fn plain_fields(fields: &[KpiField]) -> String {
    fields
        .iter()
        .map(|f| format!("{}\t{}", f.label, f.value))
        .collect::<Vec<_>>()
        .join("\n")
}
