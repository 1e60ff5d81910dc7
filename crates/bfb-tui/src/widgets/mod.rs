//! Reusable widgets shared by the page screens.

pub mod chart;
pub mod form;
pub mod tables;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

use bfb_core::render::Badge;

use crate::theme;

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

/// A badge as a colored span showing the backend's status text.
pub fn badge_span(badge: &Badge) -> Span<'static> {
    Span::styled(badge.text.clone(), theme::badge(badge.style))
}

/// Rounded panel block, highlighted when focused.
pub fn panel(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        })
}

/// Yes/no dialog drawn over `area`.
pub fn render_confirm(frame: &mut Frame, area: Rect, prompt: &str) {
    let dialog = centered(area, 44, 5);
    frame.render_widget(Clear, dialog);
    let block = panel("Confirm", true).style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);
    let lines = vec![
        Line::from(Span::styled(format!(" {prompt}"), theme::table_row())),
        Line::from(vec![
            Span::styled(" y ", theme::key_hint_key()),
            Span::styled("yes   ", theme::key_hint()),
            Span::styled("n/Esc ", theme::key_hint_key()),
            Span::styled("no", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// One line of `key description` hints.
pub fn hints(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (key, desc) in pairs {
        spans.push(Span::styled(format!("{key} "), theme::key_hint_key()));
        spans.push(Span::styled(format!("{desc}  "), theme::key_hint()));
    }
    Line::from(spans)
}
