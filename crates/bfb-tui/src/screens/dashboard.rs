//! Dashboard screen: the KPI panel and the orders-by-status chart.

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use bfb_core::render::{KpiField, KpiView};
use bfb_core::{PageId, ViewStore};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{self, chart};

pub struct DashboardScreen {
    focused: bool,
    views: Arc<ViewStore>,
    kpi: Option<Arc<KpiView>>,
}

impl DashboardScreen {
    pub fn new(views: Arc<ViewStore>) -> Self {
        Self {
            focused: false,
            views,
            kpi: None,
        }
    }
}

/// One card per group: sites, inventory, orders.
fn render_group(frame: &mut Frame, area: Rect, title: &str, fields: &[KpiField], focused: bool) {
    let block = widgets::panel(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = fields
        .iter()
        .map(|f| {
            Line::from(vec![
                Span::styled(format!(" {:<14}", f.label), theme::key_hint()),
                Span::styled(
                    f.value.to_string(),
                    theme::table_row().add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ViewsChanged(PageId::Dashboard) = action {
            self.kpi = self.views.kpi();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(kpi) = &self.kpi else {
            let block = widgets::panel("Dashboard", self.focused);
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(Span::styled("  Nothing loaded yet.", theme::key_hint())),
                inner,
            );
            return;
        };

        let layout = Layout::vertical([Constraint::Length(6), Constraint::Min(8)]).split(area);
        let cards = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(layout[0]);

        // Panel order: 3 site fields, 3 inventory fields, 4 order fields.
        let (sites, rest) = kpi.panel.split_at(kpi.panel.len().min(3));
        let (inventory, orders) = rest.split_at(rest.len().min(3));
        render_group(frame, cards[0], "Sites", sites, self.focused);
        render_group(frame, cards[1], "Inventory", inventory, self.focused);
        render_group(frame, cards[2], "Orders", orders, self.focused);

        frame.render_widget(chart::series_chart(&kpi.orders, 12), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
