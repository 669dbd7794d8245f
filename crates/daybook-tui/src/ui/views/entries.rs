use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use daybook_core::models::{Entry, Todo};

use super::list_window;
use crate::ui::format::{format_tags, format_timestamp, truncate_with_ellipsis};
use crate::ui::layout::visible_rows;
use crate::ui::{theme, App};

// =============================================================================
// ENTRIES LIST
// =============================================================================

pub fn render_entries(f: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_entries();
    if visible.is_empty() {
        let message = if app.filter.is_active() {
            "No entries match the filter."
        } else {
            "No entries yet. Press n to write one."
        };
        f.render_widget(
            Paragraph::new(Span::styled(message, theme::text_muted())),
            area,
        );
        return;
    }

    let selected = app.entries_list.selected.min(visible.len() - 1);
    let (start, end) = list_window(selected, visible.len(), visible_rows(area));
    let width = area.width as usize;

    let lines: Vec<Line> = visible[start..end]
        .iter()
        .enumerate()
        .map(|(offset, entry)| {
            let is_selected = start + offset == selected;
            entry_row(app, entry, is_selected, width)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn entry_row(app: &App, entry: &Entry, selected: bool, width: usize) -> Line<'static> {
    let marker = if selected { "► " } else { "  " };
    let counts = app.entry_todo_counts(&entry.id);
    let suffix = if counts.total() > 0 {
        format!("  [{}/{}]", counts.done, counts.total())
    } else {
        String::new()
    };
    let tags = if entry.tags.is_empty() {
        String::new()
    } else {
        format!("  {}", format_tags(&entry.tags))
    };

    let head = format!("{}{} | ", marker, format_timestamp(entry.timestamp));
    let title_room = width.saturating_sub(head.chars().count() + tags.chars().count() + suffix.len());
    let title = truncate_with_ellipsis(&entry.title, title_room.max(8));

    let base = if selected {
        theme::selected_row()
    } else {
        theme::text_primary()
    };
    Line::from(vec![
        Span::styled(head, base.fg(theme::TEXT_MUTED)),
        Span::styled(title, base),
        Span::styled(tags, base.fg(theme::ACCENT_SPECIAL)),
        Span::styled(suffix, base.fg(theme::TEXT_MUTED)),
    ])
}

// =============================================================================
// ENTRY VIEWER
// =============================================================================

pub fn render_entry_view(f: &mut Frame, app: &App, area: Rect) {
    let Some(entry) = app.viewed_entry() else {
        f.render_widget(
            Paragraph::new(Span::styled("Entry not found.", theme::text_muted())),
            area,
        );
        return;
    };

    let mut meta = format_timestamp(entry.timestamp);
    if !entry.tags.is_empty() {
        meta.push_str(" • ");
        meta.push_str(&format_tags(&entry.tags));
    }

    let mut lines = vec![
        Line::from(Span::styled(entry.title.clone(), theme::title())),
        Line::from(Span::styled(meta, theme::text_muted())),
        Line::from(""),
    ];
    lines.extend(
        entry
            .body
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), theme::text_primary()))),
    );

    let todos = app.entry_todos(&entry.id);
    if !todos.is_empty() {
        let counts = app.entry_todo_counts(&entry.id);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Todos ({} open, {} total)", counts.pending(), counts.total()),
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(todos.into_iter().map(linked_todo_line));
    }

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.entry_view.scroll, 0));
    f.render_widget(para, area);
}

fn linked_todo_line(todo: &Todo) -> Line<'static> {
    let color = theme::status_color(todo.status);
    let mut spans = vec![
        Span::raw("  "),
        Span::styled(
            format!("{} {}", todo.status.icon(), todo.title),
            Style::default().fg(color),
        ),
    ];
    if !todo.tags.is_empty() {
        spans.push(Span::styled(
            format!(" {}", format_tags(&todo.tags)),
            theme::text_muted(),
        ));
    }
    Line::from(spans)
}
