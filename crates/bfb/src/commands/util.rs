//! Shared helpers for command handlers.

use std::sync::Arc;

use owo_colors::OwoColorize;

use bfb_core::{Notice, NoticeLevel, Notifier};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Prompt(e.to_string()))
}

/// Prints success notices on stderr.
///
/// Failures are not printed here: the handler returns them as a
/// `CliError` and `main` renders the diagnostic.
pub struct CliNotifier {
    quiet: bool,
    color: bool,
}

impl Notifier for CliNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success if !self.quiet => {
                if self.color {
                    eprintln!("{} {}", "✓".green(), notice.message);
                } else {
                    eprintln!("{}", notice.message);
                }
            }
            NoticeLevel::Success => {}
            NoticeLevel::Error => tracing::debug!(message = %notice.message, "mutation failed"),
        }
    }
}

pub fn notifier(global: &GlobalOpts) -> Arc<dyn Notifier> {
    Arc::new(CliNotifier {
        quiet: global.quiet,
        color: output::should_color(global.color),
    })
}
