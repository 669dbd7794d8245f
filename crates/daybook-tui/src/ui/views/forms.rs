use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::layout::SINGLE_LINE_INPUT_HEIGHT;
use crate::ui::text_editor::TextEditor;
use crate::ui::{theme, App};

/// Bordered editor box with the terminal cursor placed at the edit point.
/// Scrolls vertically so the cursor row stays inside the box.
pub(crate) fn render_editor(
    f: &mut Frame,
    editor: &TextEditor,
    area: Rect,
    title: &str,
    placeholder: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(true))
        .title(Span::styled(format!(" {} ", title), theme::text_muted()))
        .style(Style::default().bg(theme::BG_INPUT));
    let inner = block.inner(area);

    let (row, _) = editor.cursor_position();
    let col = editor.cursor_column_chars();
    let height = inner.height.max(1) as usize;
    let scroll = row.saturating_sub(height - 1);

    let para = if editor.text.is_empty() {
        Paragraph::new(Span::styled(placeholder.to_string(), theme::text_dim()))
    } else {
        let lines: Vec<Line> = editor
            .text
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), theme::text_primary())))
            .collect();
        Paragraph::new(lines).scroll((scroll as u16, 0))
    };
    f.render_widget(para.block(block), area);

    let x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
    let y = inner.y + (row - scroll) as u16;
    f.set_cursor_position((x, y));
}

pub fn render_entry_form(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.entry_form;
    let title = if form.editing.is_some() {
        "Edit entry"
    } else {
        "New entry"
    };
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
    render_editor(
        f,
        &form.editor,
        chunks[0],
        title,
        "First line is the title. Use @tags and !todo lines.",
    );

    let state = if form.is_dirty() {
        Span::styled("● unsaved", Style::default().fg(theme::ACCENT_WARNING))
    } else {
        Span::styled("saved", theme::text_dim())
    };
    f.render_widget(Paragraph::new(Line::from(state)), chunks[1]);
}

pub fn render_todo_form(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(SINGLE_LINE_INPUT_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);
    render_editor(
        f,
        &app.todo_form.editor,
        chunks[0],
        "Todo",
        "What needs doing? @tags allowed",
    );

    if app.todo_form.saved_title.is_some() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Saved. Further Ctrl+S updates the same todo.",
                theme::text_dim(),
            )),
            chunks[1],
        );
    }
}
