//! Text editing keys shared by the entry form, the todo form and the filter input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::text_editor::TextEditor;

/// Apply an editing key to `editor`. Returns false when the key is not an
/// editing key, so the caller can treat it as a command.
///
/// With `multiline` unset, Enter and vertical movement are left to the caller.
pub(super) fn handle_editor_key(editor: &mut TextEditor, key: KeyEvent, multiline: bool) -> bool {
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);
    let has_shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Enter if multiline => editor.insert_newline(),
        KeyCode::Char('j') if has_ctrl && multiline => editor.insert_newline(),
        KeyCode::Char('a') if has_ctrl => editor.move_to_line_start(),
        KeyCode::Char('e') if has_ctrl => editor.move_to_line_end(),
        KeyCode::Char('k') if has_ctrl => editor.kill_to_line_end(),
        KeyCode::Char('u') if has_ctrl => editor.kill_to_line_start(),
        KeyCode::Char('w') if has_ctrl => editor.delete_word_backward(),
        KeyCode::Char('d') if has_ctrl => editor.delete_char_at(),
        KeyCode::Char('z') if has_ctrl && has_shift => editor.redo(),
        KeyCode::Char('z') if has_ctrl => editor.undo(),
        KeyCode::Char('y') if has_ctrl => editor.redo(),
        KeyCode::Left if has_alt => editor.move_word_left(),
        KeyCode::Right if has_alt => editor.move_word_right(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Home => editor.move_to_line_start(),
        KeyCode::End => editor.move_to_line_end(),
        KeyCode::Backspace if has_alt => editor.delete_word_backward(),
        KeyCode::Backspace => editor.delete_char_before(),
        KeyCode::Delete => editor.delete_char_at(),
        KeyCode::Up if multiline => editor.move_up(),
        KeyCode::Down if multiline => editor.move_down(),
        KeyCode::Char(c) if !has_ctrl && !has_alt => editor.insert_char(c),
        _ => return false,
    }
    true
}
