//! Inline popup form with text and choice fields.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::theme;

use super::{centered, hints, panel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text(String),
    /// `(id, label)` options; `None` until the user picks one.
    Choice {
        options: Vec<(u64, String)>,
        selected: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub fn text(label: &'static str, initial: impl Into<String>) -> Self {
        Self {
            label,
            kind: FieldKind::Text(initial.into()),
        }
    }

    pub fn choice(label: &'static str, options: Vec<(u64, String)>) -> Self {
        Self {
            label,
            kind: FieldKind::Choice {
                options,
                selected: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Editing,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub title: String,
    fields: Vec<Field>,
    active: usize,
}

impl Form {
    pub fn new(title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            title: title.into(),
            fields,
            active: 0,
        }
    }

    /// Text of field `idx`; empty for choice fields.
    pub fn text(&self, idx: usize) -> String {
        match self.fields.get(idx).map(|f| &f.kind) {
            Some(FieldKind::Text(value)) => value.clone(),
            _ => String::new(),
        }
    }

    /// Picked id of choice field `idx`.
    pub fn choice(&self, idx: usize) -> Option<u64> {
        match self.fields.get(idx).map(|f| &f.kind) {
            Some(FieldKind::Choice { options, selected }) => {
                selected.and_then(|i| options.get(i)).map(|(id, _)| *id)
            }
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Esc => return FormEvent::Cancel,
            KeyCode::Enter => return FormEvent::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.active = (self.active + 1) % self.fields.len().max(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                let len = self.fields.len().max(1);
                self.active = (self.active + len - 1) % len;
            }
            code => {
                if let Some(field) = self.fields.get_mut(self.active) {
                    edit(&mut field.kind, code);
                }
            }
        }
        FormEvent::Editing
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let height = u16::try_from(self.fields.len()).unwrap_or(8).saturating_add(4);
        let popup = centered(area, 60, height);
        frame.render_widget(Clear, popup);

        let block = panel(&self.title, true).style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut lines: Vec<Line> = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let active = i == self.active;
                let value = match &field.kind {
                    FieldKind::Text(value) if active => format!("{value}▏"),
                    FieldKind::Text(value) => value.clone(),
                    FieldKind::Choice { options, selected } => match selected.and_then(|s| options.get(s)) {
                        Some((id, label)) => format!("◂ {label} (#{id}) ▸"),
                        None if options.is_empty() => "(nothing to choose)".into(),
                        None => "◂ choose ▸".into(),
                    },
                };
                let label_style = if active {
                    theme::title_style()
                } else {
                    theme::key_hint()
                };
                let value_style = if active {
                    theme::table_row().add_modifier(Modifier::BOLD)
                } else {
                    theme::table_row()
                };
                Line::from(vec![
                    Span::styled(format!(" {:<10} ", field.label), label_style),
                    Span::styled(value, value_style),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(hints(&[
            ("Tab", "next"),
            ("←/→", "choose"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ]));
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn edit(kind: &mut FieldKind, code: KeyCode) {
    match (kind, code) {
        (FieldKind::Text(value), KeyCode::Char(c)) => value.push(c),
        (FieldKind::Text(value), KeyCode::Backspace) => {
            value.pop();
        }
        (FieldKind::Choice { options, selected }, KeyCode::Right) if !options.is_empty() => {
            *selected = Some(selected.map_or(0, |i| (i + 1) % options.len()));
        }
        (FieldKind::Choice { options, selected }, KeyCode::Left) if !options.is_empty() => {
            let len = options.len();
            *selected = Some(selected.map_or(len - 1, |i| (i + len - 1) % len));
        }
        _ => {}
    }
}
