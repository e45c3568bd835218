//! Filter form row: Start / End inputs and Apply / Clear buttons.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Focus};
use crate::form::FormField;
use crate::theme;

/// Display width of an input box (YYYY-MM-DD plus cursor).
const INPUT_WIDTH: usize = 11;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.focus == Focus::Form;
    let hint = if active {
        " Filter Events by Date Range [Tab]next [Enter]apply [Esc]done "
    } else {
        " Filter Events by Date Range [/]edit [c]clear "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(hint)
        .title_style(theme::panel_title(active));

    let form = &app.form;
    let focused = |field: FormField| active && form.focus == field;

    let mut spans = vec![
        Span::styled("Start Date: ", theme::muted()),
        input(&form.start, focused(FormField::Start)),
        Span::raw("  "),
        Span::styled("End Date: ", theme::muted()),
        input(&form.end, focused(FormField::End)),
        Span::raw("  "),
        Span::styled(" Apply Filter ", theme::field(focused(FormField::Apply))),
        Span::raw(" "),
        Span::styled(" Clear Filter ", theme::field(focused(FormField::Clear))),
        Span::raw("   "),
    ];

    let applied = app.dashboard.active_filter();
    if applied.is_unbounded() {
        spans.push(Span::styled("no filter", theme::muted()));
    } else {
        spans.push(Span::styled(
            format!("active: {} → {}", applied.start_date, applied.end_date),
            theme::neutral(),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn input(value: &str, focused: bool) -> Span<'static> {
    let mut shown = value.to_string();
    if focused {
        shown.push('_');
    }
    if shown.is_empty() {
        shown.push_str("YYYY-MM-DD");
        return Span::styled(format!("[{shown:<INPUT_WIDTH$}]"), theme::muted());
    }
    Span::styled(format!("[{shown:<INPUT_WIDTH$}]"), theme::field(focused))
}
