//! Site command handlers.

use bfb_core::render::render_sites;
use bfb_core::{CoreError, PageId, Portal};

use crate::cli::{GlobalOpts, OutputFormat, SitesArgs, SitesCommand};
use crate::error::CliError;
use crate::output;

use super::{tables, util};

pub async fn handle(portal: &Portal, args: SitesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List => {
            let sites = {
                let _loading = portal.loading().acquire();
                portal.client().list_sites().await.map_err(CoreError::from)?
            };
            let view = render_sites(&sites);
            output::print_output(&tables::sites(view.rows(), global), global.quiet);
            Ok(())
        }

        SitesCommand::Add { name, status } => {
            let page = portal.page(PageId::Manager, util::notifier(global));
            let site = page
                .dispatcher()
                .create_site(&name, status.as_deref())
                .await?;
            let out = match global.output {
                OutputFormat::Table => tables::sites(page.views().sites().rows(), global),
                _ => output::render_single(
                    global.output,
                    &site,
                    |_| String::new(),
                    |s| s.site_id.to_string(),
                ),
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
