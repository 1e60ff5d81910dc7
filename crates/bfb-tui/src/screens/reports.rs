//! Reports screen: order and inventory status breakdowns.

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use bfb_core::render::KpiView;
use bfb_core::{PageId, ViewStore};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{self, chart};

pub struct ReportsScreen {
    focused: bool,
    views: Arc<ViewStore>,
    kpi: Option<Arc<KpiView>>,
}

impl ReportsScreen {
    pub fn new(views: Arc<ViewStore>) -> Self {
        Self {
            focused: false,
            views,
            kpi: None,
        }
    }
}

impl Component for ReportsScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ViewsChanged(PageId::Reports) = action {
            self.kpi = self.views.kpi();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(kpi) = &self.kpi else {
            let block = widgets::panel("Reports", self.focused);
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(Span::styled("  Nothing loaded yet.", theme::key_hint())),
                inner,
            );
            return;
        };

        let layout = Layout::vertical([Constraint::Min(8), Constraint::Length(1)]).split(area);
        let charts =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(layout[0]);

        frame.render_widget(chart::series_chart(&kpi.orders, 10), charts[0]);
        frame.render_widget(chart::series_chart(&kpi.inventory, 10), charts[1]);

        let totals = Line::from(vec![
            Span::styled(" orders ", theme::key_hint()),
            Span::styled(kpi.orders.total().to_string(), theme::table_row()),
            Span::styled("   inventory lines ", theme::key_hint()),
            Span::styled(kpi.inventory.total().to_string(), theme::table_row()),
        ]);
        frame.render_widget(Paragraph::new(totals), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
