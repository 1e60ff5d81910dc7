//! The interface every screen implements.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// A screen reacts to keys and actions and draws itself. All calls come
/// from the event loop task.
pub trait Component: Send {
    /// Keys the app did not claim. A returned action is queued.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Actions routed to this screen, such as `ViewsChanged` for its page.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// The screen's tab was selected or left.
    fn set_focused(&mut self, _focused: bool) {}

    /// True while an open form or dialog owns the keyboard. The app then
    /// routes every key except Ctrl+C here.
    fn captures_input(&self) -> bool {
        false
    }
}
