use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui;
use crate::ui::components::render_statusbar;
use crate::ui::layout;
use crate::ui::{App, Screen};

/// Key hints shown in the footer for each screen.
pub fn footer_hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Dashboard => "n: new entry • a: add todo • t: todos • e: entries • q: quit",
        Screen::EntryForm => "ctrl+s: save • esc: exit",
        Screen::EntriesList => {
            "j/k: navigate • enter: view • d: delete • /: filter • f: filters • n: new • a: add todo • t: todos • esc: back • q: quit"
        }
        Screen::EntryView => {
            "j/k: next/prev • pgup/pgdn: scroll • i: edit • n: new entry • a: add todo • t: todos • e: entries • d: dashboard • q: quit"
        }
        Screen::TodosList => {
            "j/k: navigate • space: cycle • J/K: reorder • r: refresh • /: filter • f: filters • n: new entry • a: add • e: entries • esc: back • q: quit"
        }
        Screen::AddTodoForm => "enter: save & add another • ctrl+s: save • esc: exit",
        Screen::TagFilterInput => "tab: complete • enter: apply • esc: back",
        Screen::DateFilterMenu => "j/k: navigate • enter: select • esc: back",
        Screen::FilterSummary => "@: tags & dates • d: date • c: clear all • enter/esc: back",
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(ui::theme::BG_APP));
    f.render_widget(bg_block, f.area());

    let [header_area, content_area, footer_area, statusbar_area] = layout::chrome(f.area());

    // Chrome turns red while a quit is pending
    let chrome_color = if app.pending_quit {
        ui::theme::ACCENT_ERROR
    } else {
        ui::theme::ACCENT_PRIMARY
    };

    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);
    let header = Paragraph::new(format!("{}Daybook - {}", padding, app.screen.title())).style(
        Style::default()
            .fg(chrome_color)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(header, header_area);

    let content = layout::with_content_padding(content_area);
    match app.screen {
        Screen::Dashboard => ui::views::render_dashboard(f, app, content),
        Screen::EntryForm => ui::views::render_entry_form(f, app, content),
        Screen::EntriesList => ui::views::render_entries(f, app, content),
        Screen::EntryView => ui::views::render_entry_view(f, app, content),
        Screen::TodosList => ui::views::render_todos(f, app, content),
        Screen::AddTodoForm => ui::views::render_todo_form(f, app, content),
        Screen::TagFilterInput => ui::views::render_filter_input(f, app, content),
        Screen::DateFilterMenu => ui::views::render_date_menu(f, app, content),
        Screen::FilterSummary => ui::views::render_filter_summary(f, app, content),
    }

    let (footer_text, footer_style) = if app.pending_quit {
        (
            "⚠ Press Ctrl+C again to quit",
            Style::default().fg(ui::theme::ACCENT_ERROR),
        )
    } else {
        (footer_hint(app.screen), ui::theme::text_muted())
    };
    let footer = Paragraph::new(format!("{}{}", padding, footer_text)).style(footer_style);
    f.render_widget(footer, footer_area);

    render_statusbar(f, statusbar_area, app.status.as_ref(), &app.filter);
}
