//! Top-level UI layout — header, filter form, chart, summary, status bar.

pub mod chart_panel;
pub mod filter_panel;
pub mod overlays;
pub mod status_bar;
pub mod summary_panel;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, Overlay};
use crate::theme;

pub const TITLE: &str = "Brent Oil Price Analysis Dashboard";

/// Filter form block: border + one input row.
const FILTER_HEIGHT: u16 = 3;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let area = f.area();
    let (chart_width, chart_height) = app.layout.size_for(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(FILTER_HEIGHT),
            Constraint::Length(chart_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, chunks[0]);
    filter_panel::render(f, chunks[1], app);
    chart_panel::render(f, fit_width(chunks[2], chart_width), app);
    summary_panel::render(f, chunks[3], app);
    status_bar::render(f, chunks[4], app);

    match app.overlay {
        Overlay::Help => overlays::render_help(f, chunks[2].union(chunks[3])),
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[2].union(chunks[3]), app),
        Overlay::None => {}
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(TITLE)
        .style(theme::header())
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// Left-aligned sub-rect of at most `width` columns.
fn fit_width(area: Rect, width: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width.min(area.width)), Constraint::Min(0)])
        .split(area)[0]
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
