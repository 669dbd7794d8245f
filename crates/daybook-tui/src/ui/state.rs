//! Per-screen sub-states owned by [`App`](super::App).

use chrono::Local;
use daybook_core::models::{DatePreset, Entry, Todo};

use super::text_editor::TextEditor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    EntryForm,
    EntriesList,
    EntryView,
    TodosList,
    AddTodoForm,
    TagFilterInput,
    DateFilterMenu,
    FilterSummary,
}

impl Screen {
    /// Screens whose arrival triggers a reload of both collections.
    pub fn loads_on_enter(&self) -> bool {
        matches!(self, Self::EntriesList | Self::TodosList | Self::EntryView)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::EntryForm => "Entry",
            Self::EntriesList => "Entries",
            Self::EntryView => "View Entry",
            Self::TodosList => "Todos",
            Self::AddTodoForm => "Add Todo",
            Self::TagFilterInput => "Filter",
            Self::DateFilterMenu => "Date Filter",
            Self::FilterSummary => "Filters",
        }
    }
}

/// Which list a filter flow was opened from and returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    #[default]
    Entries,
    Todos,
}

impl ListKind {
    pub fn screen(&self) -> Screen {
        match self {
            Self::Entries => Screen::EntriesList,
            Self::Todos => Screen::TodosList,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EntryFormState {
    pub editor: TextEditor,
    /// The entry being edited. Set on first save of a new entry so later saves
    /// update the same record.
    pub editing: Option<Entry>,
    /// Text as of the last successful save
    pub saved_text: String,
    pub pending_discard: bool,
    pub return_to: Screen,
}

impl EntryFormState {
    pub fn new(return_to: Screen) -> Self {
        Self {
            editor: TextEditor::new(),
            editing: None,
            saved_text: String::new(),
            pending_discard: false,
            return_to,
        }
    }

    pub fn edit(entry: Entry, return_to: Screen) -> Self {
        let text = entry.compose_content();
        Self {
            editor: TextEditor::with_text(text.clone()),
            editing: Some(entry),
            saved_text: text,
            pending_discard: false,
            return_to,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.editor.text != self.saved_text
    }
}

impl Default for EntryFormState {
    fn default() -> Self {
        Self::new(Screen::Dashboard)
    }
}

#[derive(Debug, Clone)]
pub struct AddTodoFormState {
    pub editor: TextEditor,
    /// Record being written. Its id is fixed until the form resets, so
    /// repeated saves update the same todo.
    pub draft: Todo,
    pub saved_title: Option<String>,
    pub pending_discard: bool,
    pub return_to: Screen,
}

impl AddTodoFormState {
    pub fn new(return_to: Screen) -> Self {
        Self {
            editor: TextEditor::new(),
            draft: Todo::new("", None, 0, Local::now()),
            saved_title: None,
            pending_discard: false,
            return_to,
        }
    }

    /// Fresh draft for the next todo, same destination.
    pub fn reset(&mut self) {
        *self = Self::new(self.return_to);
    }

    pub fn is_dirty(&self) -> bool {
        let title = self.editor.text.trim();
        !title.is_empty() && self.saved_title.as_deref() != Some(title)
    }
}

impl Default for AddTodoFormState {
    fn default() -> Self {
        Self::new(Screen::Dashboard)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntriesListState {
    pub selected: usize,
    pub pending_delete: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EntryViewState {
    pub entry_id: String,
    pub scroll: u16,
}

#[derive(Debug, Clone, Default)]
pub struct TodosListState {
    pub selected: usize,
}

#[derive(Debug, Clone)]
pub struct FilterInputState {
    pub editor: TextEditor,
    pub return_to: Screen,
}

impl Default for FilterInputState {
    fn default() -> Self {
        Self {
            editor: TextEditor::new(),
            return_to: Screen::EntriesList,
        }
    }
}

/// Row 0 is "Any date"; rows 1.. are the presets in order.
#[derive(Debug, Clone, Default)]
pub struct DateMenuState {
    pub selected: usize,
}

impl DateMenuState {
    pub fn row_count() -> usize {
        DatePreset::ALL.len() + 1
    }

    pub fn choice(&self) -> Option<DatePreset> {
        self.selected
            .checked_sub(1)
            .and_then(|i| DatePreset::ALL.get(i).copied())
    }

    pub fn select_preset(preset: Option<DatePreset>) -> Self {
        let selected = preset
            .and_then(|p| DatePreset::ALL.iter().position(|q| *q == p))
            .map_or(0, |i| i + 1);
        Self { selected }
    }
}
