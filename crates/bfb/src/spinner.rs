//! Terminal rendition of the loading indicator.
//!
//! Draws an `indicatif` spinner on stderr while any request is in flight.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;

use bfb_core::LoadingIndicator;

use crate::cli::GlobalOpts;

/// Stops drawing when dropped.
pub struct SpinnerTask(JoinHandle<()>);

impl Drop for SpinnerTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Follow `loading` with a spinner, unless stderr is not a terminal or
/// `--quiet` is set.
pub fn attach(loading: &LoadingIndicator, global: &GlobalOpts) -> Option<SpinnerTask> {
    if global.quiet || !std::io::stderr().is_terminal() {
        return None;
    }

    let mut visible = loading.subscribe();
    let handle = tokio::spawn(async move {
        let mut bar: Option<ProgressBar> = None;
        loop {
            let show = *visible.borrow_and_update();
            match (show, bar.take()) {
                (true, None) => bar = Some(start()),
                (true, Some(existing)) => bar = Some(existing),
                (false, Some(existing)) => existing.finish_and_clear(),
                (false, None) => {}
            }
            if visible.changed().await.is_err() {
                break;
            }
        }
        if let Some(existing) = bar {
            existing.finish_and_clear();
        }
    });
    Some(SpinnerTask(handle))
}

fn start() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message("Loading…");
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
