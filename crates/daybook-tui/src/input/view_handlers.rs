//! Handlers for the non-editing screens.

use crossterm::event::{KeyCode, KeyEvent};
use daybook_core::ordering::MoveDirection;
use daybook_core::worker::StoreCommand;

use crate::ui::state::DateMenuState;
use crate::ui::{App, ListKind, Screen};

/// Lines moved by PgUp/PgDn in the entry viewer
const PAGE_SCROLL: i32 = 10;

// =============================================================================
// DASHBOARD
// =============================================================================

pub(super) fn handle_dashboard_key(app: &mut App, key: KeyEvent) -> Vec<StoreCommand> {
    match key.code {
        KeyCode::Char('n') => app.open_entry_form(),
        KeyCode::Char('a') => app.open_todo_form(),
        KeyCode::Char('e') => app.open_entries(),
        KeyCode::Char('t') => app.open_todos(),
        KeyCode::Char('q') => {
            app.quit();
            Vec::new()
        }
        _ => Vec::new(),
    }
}

// =============================================================================
// ENTRIES
// =============================================================================

pub(super) fn handle_entries_key(app: &mut App, key: KeyEvent) -> Vec<StoreCommand> {
    // A pending delete swallows whatever comes next unless it confirms
    if app.entries_list.pending_delete && key.code != KeyCode::Char('d') {
        app.cancel_delete();
        return Vec::new();
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_entry(1);
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_entry(-1);
            Vec::new()
        }
        KeyCode::Enter => app.open_selected_entry(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('/') => app.toggle_filter(ListKind::Entries),
        KeyCode::Char('f') => app.open_filter_summary(ListKind::Entries),
        KeyCode::Char('n') => app.open_entry_form(),
        KeyCode::Char('a') => app.open_todo_form(),
        KeyCode::Char('t') => app.open_todos(),
        KeyCode::Esc => app.navigate(Screen::Dashboard),
        KeyCode::Char('q') => {
            app.quit();
            Vec::new()
        }
        _ => Vec::new(),
    }
}

pub(super) fn handle_entry_view_key(app: &mut App, key: KeyEvent) -> Vec<StoreCommand> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.view_adjacent_entry(1);
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.view_adjacent_entry(-1);
            Vec::new()
        }
        KeyCode::PageDown => {
            app.scroll_entry_view(PAGE_SCROLL);
            Vec::new()
        }
        KeyCode::PageUp => {
            app.scroll_entry_view(-PAGE_SCROLL);
            Vec::new()
        }
        KeyCode::Char('i') => match app.viewed_entry().cloned() {
            Some(entry) => app.open_entry_editor(entry),
            None => Vec::new(),
        },
        KeyCode::Char('n') => app.open_entry_form(),
        KeyCode::Char('a') => app.open_todo_form(),
        KeyCode::Char('e') | KeyCode::Esc => app.open_entries(),
        KeyCode::Char('t') => app.open_todos(),
        KeyCode::Char('d') => app.navigate(Screen::Dashboard),
        KeyCode::Char('q') => {
            app.quit();
            Vec::new()
        }
        _ => Vec::new(),
    }
}

// =============================================================================
// TODOS
// =============================================================================

pub(super) fn handle_todos_key(app: &mut App, key: KeyEvent) -> Vec<StoreCommand> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_todo(1);
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_todo(-1);
            Vec::new()
        }
        KeyCode::Char(' ') => app.cycle_selected_todo(),
        KeyCode::Char('K') => app.move_selected_todo(MoveDirection::Up),
        KeyCode::Char('J') => app.move_selected_todo(MoveDirection::Down),
        KeyCode::Char('r') => app.load_all(),
        KeyCode::Char('/') => app.toggle_filter(ListKind::Todos),
        KeyCode::Char('f') => app.open_filter_summary(ListKind::Todos),
        KeyCode::Char('n') => app.open_entry_form(),
        KeyCode::Char('a') => app.open_todo_form(),
        KeyCode::Char('e') => app.open_entries(),
        KeyCode::Esc => app.navigate(Screen::Dashboard),
        KeyCode::Char('q') => {
            app.quit();
            Vec::new()
        }
        _ => Vec::new(),
    }
}

// =============================================================================
// FILTERS
// =============================================================================

pub(super) fn handle_filter_summary_key(app: &mut App, key: KeyEvent) -> Vec<StoreCommand> {
    match key.code {
        KeyCode::Char('@') => app.open_filter_input(Screen::FilterSummary),
        KeyCode::Char('d') => app.open_date_menu(),
        KeyCode::Char('c') => {
            app.clear_filter();
            Vec::new()
        }
        KeyCode::Enter | KeyCode::Esc => app.return_to_list(),
        _ => Vec::new(),
    }
}

pub(super) fn handle_date_menu_key(app: &mut App, key: KeyEvent) -> Vec<StoreCommand> {
    let rows = DateMenuState::row_count();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.date_menu.selected = (app.date_menu.selected + 1).min(rows - 1);
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.date_menu.selected = app.date_menu.selected.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Enter => app.apply_date_choice(),
        KeyCode::Esc => app.navigate(Screen::FilterSummary),
        _ => Vec::new(),
    }
}
