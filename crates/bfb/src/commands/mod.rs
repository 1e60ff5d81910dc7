//! Command dispatch: bridges CLI args -> portal pages -> output formatting.

pub mod config_cmd;
pub mod inventory;
pub mod orders;
pub mod pages;
pub mod reference;
pub mod sites;
pub mod tables;
pub mod util;
pub mod watch;

use bfb_core::{PageId, Portal};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Dashboard => pages::show(portal, PageId::Dashboard, global).await,
        Command::Reports => pages::show(portal, PageId::Reports, global).await,
        Command::Orders(args) => orders::handle(portal, args, global).await,
        Command::Inventory(args) => inventory::handle(portal, args, global).await,
        Command::Sites(args) => sites::handle(portal, args, global).await,
        Command::Materials => reference::materials(portal, global).await,
        Command::Suppliers => reference::suppliers(portal, global).await,
        Command::Health => reference::health(portal, global).await,
        Command::Watch(args) => watch::handle(portal, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
