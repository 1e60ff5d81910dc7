//! `bfb-tui`: terminal front end for the BFB supply portal.
//!
//! Four pages on number keys 1-4: Dashboard, Supplier, Manager and
//! Reports. Each page loads on its first visit and re-syncs whenever its
//! tab comes back into view; the Manager page keeps its inventory live on
//! the configured refresh period.
//!
//! Logs go to a file (default `/tmp/bfb-tui.log`) so they never corrupt
//! the terminal.

mod action;
mod app;
mod bridge;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use bfb_config::Config;
use bfb_core::{Portal, PortalConfig};

use crate::app::App;

/// Terminal UI for the BFB supply portal.
#[derive(Parser, Debug)]
#[command(name = "bfb-tui", version, about)]
struct Cli {
    /// Backend base URL (e.g., http://127.0.0.1:5000/api)
    #[arg(short = 'u', long, env = "BFB_BASE_URL")]
    base_url: Option<String>,

    /// Config profile to use
    #[arg(short = 'p', long, env = "BFB_PROFILE")]
    profile: Option<String>,

    /// Live refresh period in seconds (0 disables it)
    #[arg(long, value_name = "SECS")]
    refresh: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "/tmp/bfb-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Nothing may log to stdout or stderr while the TUI
/// owns the terminal. Hold the guard until exit so logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("bfb_tui={log_level},bfb_core={log_level},bfb_api={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("bfb-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file profile, then flags. A missing or broken config file
/// falls back to built-in defaults.
fn portal_config(cli: &Cli) -> Result<PortalConfig> {
    let cfg = bfb_config::load_config().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        Config::default()
    });

    let name = cfg.active_profile_name(cli.profile.as_deref());
    let mut profile = cfg.profile(&name)?;
    if let Some(url) = &cli.base_url {
        profile.base_url.clone_from(url);
    }
    if let Some(secs) = cli.refresh {
        profile.refresh_secs = Some(secs);
    }

    Ok(bfb_config::profile_to_portal_config(&profile, &cfg.defaults)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal is touched.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = portal_config(&cli)?;
    info!(
        base_url = %config.base_url,
        refresh_secs = config.refresh_interval.as_secs(),
        "starting bfb-tui"
    );

    let portal = Portal::new(&config)?;
    let mut app = App::new(&portal);
    app.run().await?;

    Ok(())
}
