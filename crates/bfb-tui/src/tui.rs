//! Terminal setup and teardown.
//!
//! Raw mode and the alternate screen are undone on every exit path:
//! normal return, an error unwinding through `Drop`, and panics through
//! the hook from [`install_hooks`].

use std::io::{self, Stdout, stdout};

use color_eyre::eyre::Result;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tracing::warn;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Raw mode is on and the alternate screen is shown.
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout()))?,
            active: false,
        })
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Hand the terminal back to the shell. Later calls do nothing.
    pub fn leave(&mut self) {
        if std::mem::take(&mut self.active) {
            if let Err(e) = restore() {
                warn!(error = %e, "terminal restore failed");
            }
        }
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.leave();
    }
}

fn restore() -> io::Result<()> {
    execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

/// Error and panic reporting through color-eyre. Panics restore the
/// terminal before the report prints. Install before [`Tui::enter`].
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .panic_section("Logs are in the file given by --log-file (default /tmp/bfb-tui.log).")
        .into_hooks();
    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        panic_hook(info);
    }));
    Ok(())
}
