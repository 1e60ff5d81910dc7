//! Palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use bfb_core::render::BadgeStyle;

// ── Core Palette ──────────────────────────────────────────────────────

pub const SAFETY_ORANGE: Color = Color::Rgb(255, 159, 28); // #ff9f1c
pub const STEEL_BLUE: Color = Color::Rgb(110, 168, 254); // #6ea8fe
pub const CONCRETE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const WARNING_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(SAFETY_ORANGE).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(SAFETY_ORANGE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(STEEL_BLUE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(CONCRETE)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(SAFETY_ORANGE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(SAFETY_ORANGE)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(CONCRETE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(STEEL_BLUE).add_modifier(Modifier::BOLD)
}

/// Foreground for a status badge.
pub fn badge(style: BadgeStyle) -> Style {
    let color = match style {
        BadgeStyle::Ok | BadgeStyle::Success => SUCCESS_GREEN,
        BadgeStyle::Low => WARNING_YELLOW,
        BadgeStyle::Critical | BadgeStyle::Delay => ERROR_RED,
        BadgeStyle::Transit => STEEL_BLUE,
        BadgeStyle::Neutral => CONCRETE,
    };
    let base = Style::default().fg(color);
    match style {
        BadgeStyle::Critical | BadgeStyle::Delay => base.add_modifier(Modifier::BOLD),
        _ => base,
    }
}
