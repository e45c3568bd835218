//! Overlay widgets — help and error history.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Keys the filter inputs accept, as listed in the help overlay.
const DATE_KEYS: &str = "0-9 - : T Z +";

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [any key]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Dashboard");
    key(&mut lines, "/ f Tab", "Edit the date-range filter");
    key(&mut lines, "c", "Clear the filter (show all events)");
    key(&mut lines, "r", "Reload all data from the backend");
    key(&mut lines, "j / k", "Scroll the summary");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Filter form");
    key(&mut lines, DATE_KEYS, "Type a date (YYYY-MM-DD or RFC 3339)");
    key(&mut lines, "Tab / Shift+Tab", "Next / previous field or button");
    key(&mut lines, "Enter", "Apply (or Clear when that button is focused)");
    key(&mut lines, "Esc", "Leave the form");
    lines.push(Line::from(""));

    section(&mut lines, "Chart");
    lines.push(Line::from(vec![
        Span::styled("  ━ ", ratatui::style::Style::default().fg(theme::PRICE_LINE)),
        Span::styled("price (left axis)   ", theme::muted()),
        Span::styled("━ ", ratatui::style::Style::default().fg(theme::VOLATILITY_LINE)),
        Span::styled("volatility (right axis)", theme::muted()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  │ ", ratatui::style::Style::default().fg(theme::CHANGE_POINT)),
        Span::styled("change point   ", theme::muted()),
        Span::styled("│ ", ratatui::style::Style::default().fg(theme::EVENT)),
        Span::styled("event (one marker per date, last one wins)", theme::muted()),
    ]));

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section(lines: &mut Vec<Line>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:<16}"), theme::warning()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().take(end).skip(start) {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
