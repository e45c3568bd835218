//! Bottom status bar — load progress, last status message, key hints.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " /:filter c:clear r:reload e:errors ?:help q:quit",
        theme::muted(),
    ));
    spans.push(Span::raw(" | "));

    if app.is_loading() {
        let waiting: Vec<&str> = app.pending.iter().map(|e| e.label()).collect();
        spans.push(Span::styled(
            format!("loading {} ", waiting.join(", ")),
            theme::neutral(),
        ));
        spans.push(Span::raw("| "));
    }

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
