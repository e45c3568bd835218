//! Neon-on-charcoal theme tokens.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, price line)
//! - **Positive**: Neon green (volatility line, event markers)
//! - **Negative**: Hot pink (errors, change-point markers)
//! - **Warning**: Neon orange (rejected filters)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (axes, hints)

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

/// Price series line.
pub const PRICE_LINE: Color = ACCENT;
/// Volatility series line.
pub const VOLATILITY_LINE: Color = POSITIVE;
/// Change-point marker.
pub const CHANGE_POINT: Color = Color::Rgb(255, 60, 60);
/// Event marker.
pub const EVENT: Color = POSITIVE;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn header() -> Style {
    Style::default()
        .fg(BACKGROUND)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Focused form item vs idle.
pub fn field(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(BACKGROUND)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        text()
    }
}

/// Color for a signed percentage (gains green, losses pink).
pub fn change_color(value: f64) -> Color {
    if value >= 0.0 {
        POSITIVE
    } else {
        NEGATIVE
    }
}
