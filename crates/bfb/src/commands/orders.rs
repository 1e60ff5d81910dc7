//! Order command handlers.
//!
//! Status, ETA and quantity changes go through the supplier page;
//! creation and deletion through the manager page, which also owns
//! the inventory view an order affects.

use bfb_core::render::render_orders;
use bfb_core::{CoreError, OrderForm, Outcome, PageId, Portal, ViewStore};

use crate::cli::{GlobalOpts, OrdersArgs, OrdersCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{tables, util};

pub async fn handle(portal: &Portal, args: OrdersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        OrdersCommand::List { status } => {
            let orders = {
                let _loading = portal.loading().acquire();
                portal
                    .client()
                    .list_orders(status.as_deref())
                    .await
                    .map_err(CoreError::from)?
            };
            let view = render_orders(&orders);
            output::print_output(&tables::orders(view.rows(), global), global.quiet);
            Ok(())
        }

        OrdersCommand::Deliver { id } => {
            let page = portal.page(PageId::Supplier, util::notifier(global));
            let result = page.dispatcher().mark_delivered(id).await;
            finish(result, id, page.views(), global)
        }

        OrdersCommand::Transit { id } => {
            let page = portal.page(PageId::Supplier, util::notifier(global));
            let result = page.dispatcher().mark_in_transit(id).await;
            finish(result, id, page.views(), global)
        }

        OrdersCommand::Delay { id, eta, reason } => {
            let page = portal.page(PageId::Supplier, util::notifier(global));
            let result = page.dispatcher().delay_order(id, &eta, &reason).await;
            finish(result, id, page.views(), global)
        }

        OrdersCommand::Eta { id, eta } => {
            let page = portal.page(PageId::Supplier, util::notifier(global));
            let result = page.dispatcher().update_eta(id, &eta).await;
            finish(result, id, page.views(), global)
        }

        OrdersCommand::Quantity { id, quantity } => {
            let page = portal.page(PageId::Supplier, util::notifier(global));
            let result = page.dispatcher().set_order_quantity(id, quantity).await;
            finish(result, id, page.views(), global)
        }

        OrdersCommand::Create {
            material,
            supplier,
            site,
            quantity,
            eta,
        } => {
            let form = OrderForm {
                material_id: material,
                supplier_id: supplier,
                site_id: site,
                quantity,
                eta,
            };
            let page = portal.page(PageId::Manager, util::notifier(global));
            let order_id = page.dispatcher().create_order(&form).await?;
            if global.quiet {
                return Ok(());
            }
            let out = match global.output {
                OutputFormat::Table => tables::orders(page.views().orders().rows(), global),
                _ => output::render_single(
                    global.output,
                    &serde_json::json!({ "order_id": order_id }),
                    |_| String::new(),
                    |_| order_id.to_string(),
                ),
            };
            output::print_output(&out, false);
            Ok(())
        }

        OrdersCommand::Delete { id } => {
            let page = portal.page(PageId::Manager, util::notifier(global));
            let mut prompt_error = None;
            let outcome = page
                .dispatcher()
                .delete_order(id, |prompt| match util::confirm(prompt, global.yes) {
                    Ok(answer) => answer,
                    Err(e) => {
                        prompt_error = Some(e);
                        false
                    }
                })
                .await;
            if let Some(e) = prompt_error {
                return Err(e);
            }
            match outcome.map_err(|e| CliError::from(e).or_not_found("order", id, "orders list"))? {
                Outcome::Applied => {
                    let out = tables::orders(page.views().orders().rows(), global);
                    output::print_output(&out, global.quiet);
                }
                Outcome::Declined => {
                    if !global.quiet {
                        eprintln!("Order #{id} kept.");
                    }
                }
            }
            Ok(())
        }
    }
}

/// Print the re-rendered orders table after a successful change.
fn finish(
    result: Result<(), CoreError>,
    id: u64,
    views: &ViewStore,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    result.map_err(|e| CliError::from(e).or_not_found("order", id, "orders list"))?;
    output::print_output(&tables::orders(views.orders().rows(), global), global.quiet);
    Ok(())
}
