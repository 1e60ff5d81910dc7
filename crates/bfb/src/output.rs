//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use bfb_core::render::{Badge, BadgeStyle, KpiField, Series};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// The badge text, colored by its style when `color` is on.
pub fn paint_badge(badge: &Badge, color: bool) -> String {
    if !color {
        return badge.text.clone();
    }
    let text = badge.text.as_str();
    match badge.style {
        BadgeStyle::Ok | BadgeStyle::Success => text.green().to_string(),
        BadgeStyle::Low => text.yellow().to_string(),
        BadgeStyle::Critical | BadgeStyle::Delay => text.red().bold().to_string(),
        BadgeStyle::Transit => text.blue().to_string(),
        BadgeStyle::Neutral => text.dimmed().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// An empty list renders `empty` in table and plain formats; structured
/// formats still emit an empty array.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
    empty: &str,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table | OutputFormat::Plain if data.is_empty() => empty.to_owned(),
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Dashboard pieces ─────────────────────────────────────────────────

#[derive(Tabled)]
struct KpiRow {
    #[tabled(rename = "Metric")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: u64,
}

/// The KPI panel as a two-column table.
pub fn kpi_table(fields: &[KpiField]) -> String {
    let rows: Vec<KpiRow> = fields
        .iter()
        .map(|f| KpiRow {
            label: f.label,
            value: f.value,
        })
        .collect();
    render_table(&rows)
}

/// A series as a horizontal bar chart.
pub fn series_chart(series: &Series, color: bool) -> String {
    const WIDTH: u64 = 30;

    let max = series.points.iter().map(|p| p.value).max().unwrap_or(0);
    let label_width = series.points.iter().map(|p| p.label.len()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(series.title);
    for point in &series.points {
        let len = if max == 0 { 0 } else { point.value * WIDTH / max };
        let bar = "█".repeat(usize::try_from(len).unwrap_or(0));
        let bar = if color {
            bar.cyan().to_string()
        } else {
            bar
        };
        out.push_str(&format!(
            "\n  {label:<label_width$}  {bar} {value}",
            label = point.label,
            value = point.value,
        ));
    }
    out
}

// ── Format-specific renderers ────────────────────────────────────────

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
}

/// YAML output.
fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}

pub fn render_structured<T: serde::Serialize + ?Sized>(format: OutputFormat, data: &T) -> String {
    match format {
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::JsonCompact => render_json(data, true),
        _ => render_json(data, false),
    }
}

#[cfg(test)]
mod tests {
    use bfb_core::render::SeriesPoint;

    use super::*;

    #[test]
    fn uncolored_badge_is_literal_text() {
        let badge = Badge::from_status("ON_HOLD");
        assert_eq!(paint_badge(&badge, false), "ON_HOLD");
    }

    #[test]
    fn colored_badge_keeps_text() {
        let badge = Badge::from_status("DELIVERED");
        let painted = paint_badge(&badge, true);
        assert!(painted.contains("DELIVERED"));
        assert_ne!(painted, "DELIVERED");
    }

    #[test]
    fn chart_scales_to_largest_value() {
        let series = Series {
            title: "Inventory health",
            points: vec![
                SeriesPoint { label: "OK", value: 10 },
                SeriesPoint { label: "Low", value: 5 },
                SeriesPoint { label: "Reorder", value: 0 },
            ],
        };
        let chart = series_chart(&series, false);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Inventory health");
        assert_eq!(lines[1].matches('█').count(), 30);
        assert_eq!(lines[2].matches('█').count(), 15);
        assert!(lines[3].ends_with(" 0"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let data: Vec<u32> = Vec::new();
        let out = render_list(
            OutputFormat::Table,
            &data,
            |_| KpiRow { label: "", value: 0 },
            ToString::to_string,
            "No rows.",
        );
        assert_eq!(out, "No rows.");
        let json = render_list(
            OutputFormat::Json,
            &data,
            |_| KpiRow { label: "", value: 0 },
            ToString::to_string,
            "No rows.",
        );
        assert_eq!(json, "[]");
    }
}
