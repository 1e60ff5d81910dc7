//! Read-only lookups: materials, suppliers, backend health.

use bfb_core::{CoreError, Portal};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::tables;

pub async fn materials(portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    let materials = {
        let _loading = portal.loading().acquire();
        portal.client().list_materials().await.map_err(CoreError::from)?
    };
    output::print_output(&tables::materials(&materials, global), global.quiet);
    Ok(())
}

pub async fn suppliers(portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    let suppliers = {
        let _loading = portal.loading().acquire();
        portal.client().list_suppliers().await.map_err(CoreError::from)?
    };
    output::print_output(&tables::suppliers(&suppliers, global), global.quiet);
    Ok(())
}

pub async fn health(portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    let health = {
        let _loading = portal.loading().acquire();
        portal.client().health().await.map_err(CoreError::from)?
    };
    let base_url = portal.client().base_url().to_string();
    let out = output::render_single(
        global.output,
        &health,
        |h| match h.timestamp {
            Some(ref ts) => format!("{}  {}  ({ts})", h.status, base_url),
            None => format!("{}  {}", h.status, base_url),
        },
        |h| h.status.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
