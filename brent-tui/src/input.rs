//! Keyboard input dispatch — overlays → filter form → global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Focus, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. The form swallows typing while focused.
    if app.focus == Focus::Form {
        handle_form_key(app, key);
        return;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('/') | KeyCode::Char('f') | KeyCode::Tab => {
            app.focus = Focus::Form;
        }
        KeyCode::Char('c') => {
            let req = app.form.clear();
            app.apply_filter(req);
        }
        KeyCode::Char('r') => app.request_load(),
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.summary_scroll = app.summary_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.summary_scroll = app.summary_scroll.saturating_sub(1);
        }
        KeyCode::Home | KeyCode::Char('g') => app.summary_scroll = 0,
        _ => {}
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.focus = Focus::Chart,
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Enter => {
            let req = app.form.activate();
            app.apply_filter(req);
        }
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char(c) => app.form.input_char(c),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
