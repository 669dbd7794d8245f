//! Handlers for the screens that own a text editor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use daybook_core::worker::StoreCommand;

use super::editor_handlers::handle_editor_key;
use crate::ui::App;

fn is_ctrl_s(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub(super) fn handle_entry_form_key(app: &mut App, key: KeyEvent) -> Vec<StoreCommand> {
    if key.code == KeyCode::Esc {
        return app.escape_entry_form();
    }
    // Anything but a second Esc disarms the discard and is handled as usual
    if app.entry_form.pending_discard {
        app.entry_form.pending_discard = false;
        app.clear_status();
    }
    if is_ctrl_s(&key) {
        return app.save_entry();
    }
    handle_editor_key(&mut app.entry_form.editor, key, true);
    Vec::new()
}

pub(super) fn handle_todo_form_key(app: &mut App, key: KeyEvent) -> Vec<StoreCommand> {
    if key.code == KeyCode::Esc {
        return app.escape_todo_form();
    }
    if app.todo_form.pending_discard {
        app.todo_form.pending_discard = false;
        app.clear_status();
    }
    if is_ctrl_s(&key) {
        return app.save_todo(false);
    }
    if key.code == KeyCode::Enter {
        return app.save_todo(true);
    }
    handle_editor_key(&mut app.todo_form.editor, key, false);
    Vec::new()
}

pub(super) fn handle_filter_input_key(app: &mut App, key: KeyEvent) -> Vec<StoreCommand> {
    match key.code {
        KeyCode::Esc => {
            let back = app.filter_input.return_to;
            app.navigate(back)
        }
        KeyCode::Enter => app.apply_filter_input(),
        KeyCode::Tab => {
            app.autocomplete_filter();
            Vec::new()
        }
        _ => {
            handle_editor_key(&mut app.filter_input.editor, key, false);
            Vec::new()
        }
    }
}
