// Centralized theme: every colour and semantic style used by the views.

use ratatui::style::{Color, Modifier, Style};

use daybook_core::models::TodoStatus;

// =============================================================================
// COLOR PALETTE
// =============================================================================

pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Selected row background
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

pub const BG_INPUT: Color = Color::Rgb(18, 18, 18);

// -----------------------------------------------------------------------------
// Text
// -----------------------------------------------------------------------------

pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

/// Hints, placeholders, autocomplete ghost text
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

// -----------------------------------------------------------------------------
// Accents
// -----------------------------------------------------------------------------

pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);
pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);
pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

/// Tags and the entries chart series
pub const ACCENT_SPECIAL: Color = Color::Rgb(169, 154, 203);

pub const BORDER_ACTIVE: Color = Color::Rgb(100, 100, 100);
pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 60);

// =============================================================================
// STYLE FUNCTIONS
// =============================================================================

pub fn text_primary() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn text_dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn title() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn tag() -> Style {
    Style::default().fg(ACCENT_SPECIAL)
}

pub fn selected_row() -> Style {
    Style::default().bg(BG_SELECTED).fg(TEXT_PRIMARY)
}

pub fn border(active: bool) -> Style {
    if active {
        Style::default().fg(BORDER_ACTIVE)
    } else {
        Style::default().fg(BORDER_INACTIVE)
    }
}

pub fn status_color(status: TodoStatus) -> Color {
    match status {
        TodoStatus::Next => ACCENT_PRIMARY,
        TodoStatus::Open => TEXT_PRIMARY,
        TodoStatus::Done => TEXT_DIM,
    }
}
