//! Bar chart for a KPI series.

use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup};

use bfb_core::render::Series;

use crate::theme;

const SERIES_COLORS: &[ratatui::style::Color] = &[
    theme::STEEL_BLUE,
    theme::SAFETY_ORANGE,
    theme::SUCCESS_GREEN,
    theme::ERROR_RED,
];

pub fn series_chart(series: &Series, bar_width: u16) -> BarChart<'static> {
    let bars: Vec<Bar<'static>> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            Bar::default()
                .value(point.value)
                .label(Line::from(point.label))
                .text_value(point.value.to_string())
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
        })
        .collect();

    BarChart::default()
        .block(super::panel(series.title, false))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2)
}
