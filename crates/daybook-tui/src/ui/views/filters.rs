use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::forms::render_editor;
use crate::ui::app::date_menu_labels;
use crate::ui::layout::SINGLE_LINE_INPUT_HEIGHT;
use crate::ui::{theme, App};

pub fn render_filter_input(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(SINGLE_LINE_INPUT_HEIGHT),
        Constraint::Length(2), // Tab hint
        Constraint::Min(0),    // Suggestions
    ])
    .split(area);

    render_editor(
        f,
        &app.filter_input.editor,
        chunks[0],
        "Filter",
        daybook_core::filter_parser::filter_hint(),
    );

    if let Some(completion) = app.filter_suggestion() {
        f.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(format!("Tab: {}", completion), theme::text_muted())),
            ]),
            chunks[1],
        );
    }

    let matches = app.filter_matches();
    if !matches.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Suggestions:",
                Style::default()
                    .fg(theme::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(matches.join(", "), theme::text_muted())),
        ];
        f.render_widget(Paragraph::new(lines), chunks[2]);
    }
}

pub fn render_filter_summary(f: &mut Frame, app: &App, area: Rect) {
    let tags = if app.filter.tags.is_empty() {
        "none".to_string()
    } else {
        app.filter.tags_display()
    };
    let date = app.filter.date.map_or("none", |d| d.label());

    let lines = vec![
        Line::from(vec![
            Span::styled("Tags: ", theme::text_muted()),
            Span::styled(tags, theme::tag()),
        ]),
        Line::from(vec![
            Span::styled("Date: ", theme::text_muted()),
            Span::styled(date, theme::text_primary()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

pub fn render_date_menu(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = date_menu_labels()
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            if i == app.date_menu.selected {
                Line::from(Span::styled(format!("> {}", label), theme::selected_row()))
            } else {
                Line::from(Span::styled(format!("  {}", label), theme::text_primary()))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}
