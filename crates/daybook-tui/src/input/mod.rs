//! Keyboard event processing.
//!
//! - `view_handlers`: list, viewer, dashboard and filter screens
//! - `form_handlers`: the entry form, the todo form and the filter input
//! - `editor_handlers`: text editing keys shared by the forms

mod editor_handlers;
mod form_handlers;
mod view_handlers;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use daybook_core::worker::StoreCommand;

use crate::ui::{App, Screen};

use form_handlers::*;
use view_handlers::*;

/// Route a key press to the current screen. Returns the store commands the
/// key produced; the caller dispatches them.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Vec<StoreCommand> {
    // Ctrl+C twice quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        if app.pending_quit {
            app.quit();
        } else {
            app.pending_quit = true;
        }
        return Vec::new();
    }
    app.pending_quit = false;

    match app.screen {
        Screen::Dashboard => handle_dashboard_key(app, key),
        Screen::EntryForm => handle_entry_form_key(app, key),
        Screen::EntriesList => handle_entries_key(app, key),
        Screen::EntryView => handle_entry_view_key(app, key),
        Screen::TodosList => handle_todos_key(app, key),
        Screen::AddTodoForm => handle_todo_form_key(app, key),
        Screen::TagFilterInput => handle_filter_input_key(app, key),
        Screen::DateFilterMenu => handle_date_menu_key(app, key),
        Screen::FilterSummary => handle_filter_summary_key(app, key),
    }
}
