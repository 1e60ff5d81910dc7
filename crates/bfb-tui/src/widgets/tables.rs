//! Table widgets for rendered order, inventory and site rows.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use bfb_core::render::{InventoryRow, OrderRow, SiteRow, Surface};

use crate::theme;

use super::badge_span;

fn header(cells: &[&'static str]) -> Row<'static> {
    Row::new(
        cells
            .iter()
            .map(|c| Cell::from(*c).style(theme::table_header()))
            .collect::<Vec<_>>(),
    )
}

/// Placeholder text when a surface has no rows to draw. `None` means
/// draw the table.
fn placeholder<R>(surface: &Surface<R>, empty: &'static str) -> Option<&'static str> {
    if !surface.is_rendered() {
        Some("Nothing loaded yet.")
    } else if surface.empty_state_visible() {
        Some(empty)
    } else {
        None
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &'static str) {
    frame.render_widget(
        Paragraph::new(Span::styled(format!("  {text}"), theme::key_hint())),
        area,
    );
}

fn dash(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "─".into(), |v| v.to_string())
}

pub fn render_orders(frame: &mut Frame, area: Rect, surface: &Surface<OrderRow>, state: &TableState) {
    if let Some(text) = placeholder(surface, "No orders.") {
        render_placeholder(frame, area, text);
        return;
    }

    let rows: Vec<Row> = surface
        .rows()
        .iter()
        .map(|o| {
            let note = o
                .delay_reason
                .clone()
                .or_else(|| o.delivered_at.as_ref().map(|at| format!("delivered {at}")))
                .unwrap_or_default();
            Row::new(vec![
                Cell::from(format!("#{}", o.order_id)),
                Cell::from(o.material.clone()),
                Cell::from(o.supplier.clone()),
                Cell::from(o.site.clone()),
                Cell::from(dash(o.quantity)),
                Cell::from(dash(o.eta.as_deref())),
                Cell::from(badge_span(&o.badge)),
                Cell::from(note),
            ])
            .style(theme::table_row())
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(12),
        Constraint::Min(12),
        Constraint::Min(12),
        Constraint::Length(6),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header(&["ID", "Material", "Supplier", "Site", "Qty", "ETA", "Status", "Note"]))
        .row_highlight_style(theme::table_selected());

    let mut state = state.clone();
    frame.render_stateful_widget(table, area, &mut state);
}

pub fn render_inventory(
    frame: &mut Frame,
    area: Rect,
    surface: &Surface<InventoryRow>,
    state: &TableState,
) {
    if let Some(text) = placeholder(surface, "No inventory.") {
        render_placeholder(frame, area, text);
        return;
    }

    let rows: Vec<Row> = surface
        .rows()
        .iter()
        .map(|line| {
            Row::new(vec![
                Cell::from(format!("#{}", line.inventory_id)),
                Cell::from(line.material.clone()),
                Cell::from(line.site.clone()),
                Cell::from(line.qty.to_string()),
                Cell::from(dash(line.low_threshold)),
                Cell::from(badge_span(&line.badge)),
            ])
            .style(theme::table_row())
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(12),
        Constraint::Min(12),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header(&["ID", "Material", "Site", "Qty", "Low at", "Status"]))
        .row_highlight_style(theme::table_selected());

    let mut state = state.clone();
    frame.render_stateful_widget(table, area, &mut state);
}

pub fn render_sites(frame: &mut Frame, area: Rect, surface: &Surface<SiteRow>, state: &TableState) {
    if let Some(text) = placeholder(surface, "No sites.") {
        render_placeholder(frame, area, text);
        return;
    }

    let rows: Vec<Row> = surface
        .rows()
        .iter()
        .map(|site| {
            Row::new(vec![
                Cell::from(format!("#{}", site.site_id)),
                Cell::from(site.name.clone()),
                Cell::from(badge_span(&site.badge)),
            ])
            .style(theme::table_row())
        })
        .collect();

    let widths = [Constraint::Length(6), Constraint::Min(16), Constraint::Length(10)];

    let table = Table::new(rows, widths)
        .header(header(&["ID", "Name", "Status"]))
        .row_highlight_style(theme::table_selected());

    let mut state = state.clone();
    frame.render_stateful_widget(table, area, &mut state);
}

/// Keep a table selection inside `len` rows.
pub fn clamp_selection(state: &mut TableState, len: usize) {
    match (state.selected(), len) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(i), len) if i >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

/// Move a table selection by `delta`, clamped to `len` rows.
pub fn move_selection(state: &mut TableState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0);
    let next = current.saturating_add_signed(delta).min(len - 1);
    state.select(Some(next));
}
