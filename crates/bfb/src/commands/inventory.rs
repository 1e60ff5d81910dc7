//! Inventory command handlers. Changes run on the manager page.

use bfb_core::render::{InventoryRow, render_inventory};
use bfb_core::{CoreError, PageController, PageId, Portal};

use crate::cli::{GlobalOpts, InventoryArgs, InventoryCommand};
use crate::error::CliError;
use crate::output;

use super::{tables, util};

pub async fn handle(
    portal: &Portal,
    args: InventoryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        InventoryCommand::List { site } => {
            let view = render_inventory(&fetch(portal, site).await?);
            output::print_output(&tables::inventory(view.rows(), global), global.quiet);
            Ok(())
        }

        InventoryCommand::Inc { id } => {
            let row = find_row(portal, id).await?;
            let page = manager(portal, global);
            let result = page.dispatcher().increment(&row).await;
            finish(result, id, &page, global)
        }

        InventoryCommand::Dec { id } => {
            let row = find_row(portal, id).await?;
            let page = manager(portal, global);
            let result = page.dispatcher().decrement(&row).await;
            finish(result, id, &page, global)
        }

        InventoryCommand::Set { id, qty } => {
            let page = manager(portal, global);
            let result = page.dispatcher().adjust_quantity(id, qty).await;
            finish(result, id, &page, global)
        }

        InventoryCommand::Threshold { id, threshold } => {
            let page = manager(portal, global);
            let result = page.dispatcher().set_low_threshold(id, threshold).await;
            finish(result, id, &page, global)
        }
    }
}

fn manager(portal: &Portal, global: &GlobalOpts) -> PageController {
    portal.page(PageId::Manager, util::notifier(global))
}

async fn fetch(portal: &Portal, site: Option<u64>) -> Result<Vec<bfb_core::InventoryLine>, CliError> {
    let _loading = portal.loading().acquire();
    let lines = portal
        .client()
        .list_inventory(site)
        .await
        .map_err(CoreError::from)?;
    Ok(lines)
}

/// Current row for `id`; `+`/`-` targets are computed from what the
/// backend reports now.
async fn find_row(portal: &Portal, id: u64) -> Result<InventoryRow, CliError> {
    let view = render_inventory(&fetch(portal, None).await?);
    view.rows()
        .iter()
        .find(|row| row.inventory_id == id)
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource_type: "inventory line".into(),
            identifier: format!("#{id}"),
            list_command: "inventory list".into(),
        })
}

fn finish(
    result: Result<(), CoreError>,
    id: u64,
    page: &PageController,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    result.map_err(|e| CliError::from(e).or_not_found("inventory line", id, "inventory list"))?;
    let out = tables::inventory(page.views().inventory().rows(), global);
    output::print_output(&out, global.quiet);
    Ok(())
}
