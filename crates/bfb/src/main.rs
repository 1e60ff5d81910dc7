mod cli;
mod commands;
mod config;
mod error;
mod output;
mod spinner;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bfb_core::Portal;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // No backend needed for these two
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "bfb", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let portal_config = config::resolve_portal_config(&cli.global)?;
            let portal = Portal::new(&portal_config)?;
            let _spinner = spinner::attach(portal.loading(), &cli.global);

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &portal, &cli.global).await
        }
    }
}
