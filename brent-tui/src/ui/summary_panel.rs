//! Summary under the chart: change-point details, price changes around
//! events, and the events currently passing the filter.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use brent_core::summary::{change_point_block, price_change_block, SummaryLine};
use brent_core::Dashboard;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let lines = summary_lines(&app.dashboard);
    let max_scroll = lines.len().saturating_sub(1);
    let scroll = app.summary_scroll.min(max_scroll) as u16;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" Summary [j/k]scroll ")
        .title_style(theme::panel_title(false));

    f.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

/// Every summary line, unscrolled.
pub fn summary_lines(dash: &Dashboard) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    section(&mut lines, "Change Point Details");
    if dash.change_points().is_empty() {
        empty(&mut lines);
    }
    for cp in dash.change_points() {
        let block = change_point_block(cp);
        for (i, line) in block.iter().enumerate() {
            // Percentage change is the last line of the block.
            let value_style = if i + 1 == block.len() {
                Style::default().fg(theme::change_color(cp.percent_change))
            } else {
                theme::text()
            };
            lines.push(entry(line, value_style));
        }
        lines.push(Line::from(""));
    }

    section(&mut lines, "Price Changes Around Events");
    if dash.indicators().price_changes.is_empty() {
        empty(&mut lines);
    }
    for pc in &dash.indicators().price_changes {
        let block = price_change_block(pc);
        lines.push(entry(&block[0], theme::text()));
        lines.push(entry(
            &block[1],
            Style::default().fg(theme::change_color(pc.avg_price_change)),
        ));
        lines.push(Line::from(""));
    }

    section(
        &mut lines,
        &format!(
            "Events ({} of {})",
            dash.filtered_events().len(),
            dash.events().len()
        ),
    );
    if dash.filtered_events().is_empty() {
        empty(&mut lines);
    }
    for e in dash.filtered_events() {
        let mut spans = vec![
            Span::styled(format!("  {}  ", e.date), theme::muted()),
            Span::styled(e.event.clone(), Style::default().fg(theme::EVENT)),
        ];
        if let Some(desc) = &e.description {
            spans.push(Span::styled(format!(" — {desc}"), theme::muted()));
        }
        lines.push(Line::from(spans));
    }

    lines
}

fn section(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn empty(lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(Span::styled("  (none)", theme::muted())));
    lines.push(Line::from(""));
}

fn entry(line: &SummaryLine, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {}: ", line.label),
            theme::text().add_modifier(Modifier::BOLD),
        ),
        Span::styled(line.value.clone(), value_style),
    ])
}
