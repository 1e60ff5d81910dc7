//! `bfb watch PAGE`: keep a page on screen and redraw it on every change.

use std::io::{self, IsTerminal};

use bfb_core::{PageId, Portal};

use crate::cli::{GlobalOpts, OutputFormat, PageArg, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::{pages, util};

impl From<PageArg> for PageId {
    fn from(arg: PageArg) -> Self {
        match arg {
            PageArg::Dashboard => Self::Dashboard,
            PageArg::Supplier => Self::Supplier,
            PageArg::Manager => Self::Manager,
            PageArg::Reports => Self::Reports,
        }
    }
}

pub async fn handle(portal: &Portal, args: WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let page = PageId::from(args.page);
    let live = !page.spec().live.is_empty() && !portal.refresh_interval().is_zero();
    if !live {
        if !global.quiet {
            eprintln!("{} does not refresh on its own; showing it once.", page.title());
        }
        return pages::show(portal, page, global).await;
    }

    let mut controller = portal.page(page, util::notifier(global));
    let mut changes = controller.views().subscribe_changes();
    if let Err(e) = controller.activate().await {
        // The live refresh keeps trying; the next successful load redraws.
        tracing::warn!(page = %page, error = %e, "initial load failed");
        if !global.quiet {
            eprintln!("{e}");
        }
    }
    changes.borrow_and_update();
    draw(page, controller.views(), global);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                changes.borrow_and_update();
                draw(page, controller.views(), global);
            }
        }
    }

    tracing::debug!(page = %page, "watch stopped");
    Ok(())
}

fn draw(page: PageId, views: &bfb_core::ViewStore, global: &GlobalOpts) {
    let body = pages::render_page(page, views, global);
    if global.output == OutputFormat::Table && io::stdout().is_terminal() {
        // Clear and home so each redraw replaces the last one.
        print!("\x1b[2J\x1b[H");
        output::print_output(&format!("{}\n\n{body}", page.title()), global.quiet);
    } else {
        output::print_output(&body, global.quiet);
    }
}
