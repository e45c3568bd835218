//! Price chart: price on the left axis, volatility on the right axis,
//! vertical change-point and event markers, marker labels underneath.
//!
//! Ratatui charts have a single y axis, so volatility is rescaled into the
//! price range for drawing and its own scale is printed in a right-hand gutter.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Wrap};

use brent_core::chart::{Bounds, ChartModel, MarkerKind};
use brent_core::source::Endpoint;

use crate::app::AppState;
use crate::theme;

pub const CHART_TITLE: &str = "Brent Oil Prices with Change Points and Events";
const PRICE_NAME: &str = "Brent Oil Price";
const VOLATILITY_NAME: &str = "30-Day Volatility";

/// Width of the right-hand volatility axis gutter.
const RIGHT_AXIS_WIDTH: u16 = 9;
/// Rows reserved for marker labels.
const LABEL_ROWS: u16 = 2;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" {CHART_TITLE} "))
        .title_style(theme::panel_title(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let model = app.dashboard.chart_model();
    if model.is_empty() {
        render_empty(f, inner, app);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(LABEL_ROWS)])
        .split(inner);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(RIGHT_AXIS_WIDTH)])
        .split(rows[0]);

    render_chart(f, cols[0], model);
    render_right_axis(f, cols[1], model.volatility_bounds);
    render_marker_labels(f, rows[1], model);
}

fn render_empty(f: &mut Frame, area: Rect, app: &AppState) {
    let msg = if app.pending.contains(&Endpoint::Prices) {
        "Waiting for price data..."
    } else {
        "No price data. Press r to reload."
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(msg, theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_chart(f: &mut Frame, area: Rect, model: &ChartModel) {
    let Some(price) = model.price_bounds else {
        return;
    };
    let x_max = (model.rows.len().saturating_sub(1) as f64).max(1.0);

    let price_points = model.price_points();
    let vol_segments = model.volatility_segments();
    let marker_lines: Vec<([(f64, f64); 2], MarkerKind)> = model
        .markers
        .iter()
        .map(|m| {
            let x = m.x as f64;
            ([(x, price.min), (x, price.max)], m.kind)
        })
        .collect();

    // Markers first so the series draw over them.
    let mut datasets: Vec<Dataset> = marker_lines
        .iter()
        .map(|(line, kind)| {
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(marker_color(*kind)))
                .data(line)
        })
        .collect();

    datasets.push(
        Dataset::default()
            .name(PRICE_NAME)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::PRICE_LINE))
            .data(&price_points),
    );

    for (i, segment) in vol_segments.iter().enumerate() {
        let mut ds = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::VOLATILITY_LINE))
            .data(segment);
        if i == 0 {
            ds = ds.name(VOLATILITY_NAME);
        }
        datasets.push(ds);
    }

    let first = model.rows.first().map(|r| r.date.as_str()).unwrap_or_default();
    let mid = model.rows[model.rows.len() / 2].date.as_str();
    let last = model.rows.last().map(|r| r.date.as_str()).unwrap_or_default();

    let chart = Chart::new(datasets)
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Percentage(50), Constraint::Percentage(50)))
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(first.to_string(), theme::muted()),
                    Span::styled(mid.to_string(), theme::muted()),
                    Span::styled(last.to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price (USD)", theme::muted()))
                .style(theme::muted())
                .bounds([price.min, price.max])
                .labels(vec![
                    Span::styled(format!("{:.0}", price.min), theme::muted()),
                    Span::styled(format!("{:.0}", (price.min + price.max) / 2.0), theme::muted()),
                    Span::styled(format!("{:.0}", price.max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// Volatility scale, top to bottom, aligned with the chart's plot area
/// (the bottom two rows belong to the x axis).
fn render_right_axis(f: &mut Frame, area: Rect, bounds: Option<Bounds>) {
    let Some(vol) = bounds else {
        return;
    };
    let plot_rows = area.height.saturating_sub(2) as usize;
    if plot_rows < 2 {
        return;
    }

    let style = Style::default().fg(theme::VOLATILITY_LINE);
    let mut lines: Vec<Line> = vec![Line::from(""); plot_rows];
    lines[0] = Line::from(Span::styled(format!("{:.2}", vol.max), style));
    lines[plot_rows / 2] = Line::from(Span::styled(format!("{:.2}", (vol.min + vol.max) / 2.0), style));
    lines[plot_rows - 1] = Line::from(Span::styled(format!("{:.2}", vol.min), style));
    lines.push(Line::from(Span::styled(
        "Volatility",
        style.add_modifier(Modifier::DIM),
    )));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Right), area);
}

fn render_marker_labels(f: &mut Frame, area: Rect, model: &ChartModel) {
    if model.markers.is_empty() {
        return;
    }
    let mut spans: Vec<Span> = Vec::new();
    for m in &model.markers {
        let style = Style::default().fg(marker_color(m.kind));
        spans.push(Span::styled("│ ", style));
        spans.push(Span::styled(m.label.clone(), style.add_modifier(Modifier::BOLD)));
        if m.kind == MarkerKind::Event {
            spans.push(Span::styled(format!(" {}", m.date), theme::muted()));
        }
        spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }), area);
}

fn marker_color(kind: MarkerKind) -> ratatui::style::Color {
    match kind {
        MarkerKind::ChangePoint => theme::CHANGE_POINT,
        MarkerKind::Event => theme::EVENT,
    }
}
