use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use daybook_core::models::Todo;

use super::list_window;
use crate::ui::format::{format_tags, truncate_with_ellipsis};
use crate::ui::layout::visible_rows;
use crate::ui::{theme, App};

pub fn render_todos(f: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_todos();
    if visible.is_empty() {
        let message = if app.filter.is_active() {
            "No todos match the filter."
        } else {
            "No todos yet. Create an entry with !todo lines, or press a."
        };
        f.render_widget(
            Paragraph::new(Span::styled(message, theme::text_muted())),
            area,
        );
        return;
    }

    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    let list_area = chunks[0];

    let selected = app.todos_list.selected.min(visible.len() - 1);
    let (start, end) = list_window(selected, visible.len(), visible_rows(list_area));
    let width = list_area.width as usize;

    let lines: Vec<Line> = visible[start..end]
        .iter()
        .enumerate()
        .map(|(offset, todo)| todo_row(app, todo, start + offset == selected, width))
        .collect();
    f.render_widget(Paragraph::new(lines), list_area);

    if end - start < visible.len() {
        let info = format!("({}-{} of {})", start + 1, end, visible.len());
        f.render_widget(
            Paragraph::new(Span::styled(info, theme::text_dim())),
            chunks[1],
        );
    }
}

fn todo_row(app: &App, todo: &Todo, selected: bool, width: usize) -> Line<'static> {
    let marker = if selected { "> " } else { "  " };
    let base = if selected {
        theme::selected_row().fg(theme::status_color(todo.status))
    } else {
        Style::default().fg(theme::status_color(todo.status))
    };

    let tags = if todo.tags.is_empty() {
        String::new()
    } else {
        format!(" {}", format_tags(&todo.tags))
    };
    // Dangling entry ids just drop the source label
    let source = todo
        .entry_id
        .as_deref()
        .and_then(|id| app.entry_title(id))
        .map(|title| format!("  ← {}", truncate_with_ellipsis(title, 24)))
        .unwrap_or_default();

    let head = format!("{}{} ", marker, todo.status.icon());
    let room = width.saturating_sub(
        head.chars().count() + tags.chars().count() + source.chars().count(),
    );
    let title = truncate_with_ellipsis(&todo.title, room.max(8));

    Line::from(vec![
        Span::styled(head, base),
        Span::styled(title, base),
        Span::styled(tags, base.fg(theme::TEXT_MUTED)),
        Span::styled(source, base.fg(theme::TEXT_DIM)),
    ])
}
