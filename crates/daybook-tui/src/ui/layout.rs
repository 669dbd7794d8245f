// Layout constants shared by every screen.

use ratatui::layout::{Constraint, Layout, Rect};

/// Horizontal padding inside the main content block (left + right)
pub const CONTENT_PADDING_H: u16 = 2;

pub const HEADER_HEIGHT: u16 = 1;
pub const FOOTER_HEIGHT: u16 = 1;
pub const STATUSBAR_HEIGHT: u16 = 1;

/// Rows taken by the editor box in the add-todo and filter inputs
pub const SINGLE_LINE_INPUT_HEIGHT: u16 = 3;

/// Width reserved for the label column of the weekly chart
pub const CHART_LABEL_WIDTH: u16 = 5;

/// Split a screen into header, body, footer and status bar.
pub fn chrome(area: Rect) -> [Rect; 4] {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
        Constraint::Length(STATUSBAR_HEIGHT),
    ])
    .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Shrink an area by the standard horizontal padding.
pub fn with_content_padding(area: Rect) -> Rect {
    let pad = CONTENT_PADDING_H.min(area.width / 2);
    Rect {
        x: area.x + pad,
        y: area.y,
        width: area.width.saturating_sub(pad * 2),
        height: area.height,
    }
}

/// Number of list rows that fit in `area`, at least one.
pub fn visible_rows(area: Rect) -> usize {
    (area.height as usize).max(1)
}
