// Global status bar at the very bottom of the app.
// Transient notification on the left, the active filter on the right.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use daybook_core::models::ActiveFilter;

use crate::ui::format::truncate_with_ellipsis;
use crate::ui::notifications::{Notification, NotificationLevel};
use crate::ui::theme;

/// Widest the filter column may get before the notification is squeezed
const FILTER_COLUMN_MAX_WIDTH: u16 = 40;

fn level_color(level: NotificationLevel) -> ratatui::style::Color {
    match level {
        NotificationLevel::Info => theme::ACCENT_PRIMARY,
        NotificationLevel::Success => theme::ACCENT_SUCCESS,
        NotificationLevel::Warning => theme::ACCENT_WARNING,
        NotificationLevel::Error => theme::ACCENT_ERROR,
    }
}

pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    notification: Option<&Notification>,
    filter: &ActiveFilter,
) {
    let filter_text = if filter.is_active() {
        format!("⧩ {} ", filter.summary())
    } else {
        String::new()
    };
    let filter_width = (filter_text.chars().count() as u16).min(FILTER_COLUMN_MAX_WIDTH);

    let chunks = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(filter_width),
    ])
    .split(area);

    let notification_paragraph = match notification {
        Some(notification) => {
            let color = level_color(notification.level);
            // one leading space
            let room = (chunks[0].width as usize).saturating_sub(1);
            Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    truncate_with_ellipsis(&notification.message, room),
                    Style::default().fg(color),
                ),
            ]))
        }
        None => Paragraph::new(""),
    };
    f.render_widget(notification_paragraph, chunks[0]);

    if filter_width > 0 {
        let text = truncate_with_ellipsis(&filter_text, filter_width as usize);
        f.render_widget(
            Paragraph::new(Span::styled(text, theme::tag())),
            chunks[1],
        );
    }
}
