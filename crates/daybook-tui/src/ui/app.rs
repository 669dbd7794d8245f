use std::collections::HashMap;

use chrono::Local;
use daybook_core::constants::DASHBOARD_WEEKS;
use daybook_core::content::{extract_tags, extract_task_titles};
use daybook_core::events::{CoreEvent, RequestId};
use daybook_core::filter_parser::{self, parse_filter_input};
use daybook_core::models::{ActiveFilter, DatePreset, Entry, Todo};
use daybook_core::ordering::{
    apply_filter, sorted_entries, sorted_todos, todos_for_entry, unique_tags, visible_neighbour,
    MoveDirection, MoveOutcome, TodoCounts,
};
use daybook_core::stats::{aggregate_by_week, DashboardSummary, WeekBucket};
use daybook_core::worker::StoreCommand;

use super::notifications::Notification;
use super::requests::{Collection, LoadFreshness, RequestTracker};
use super::text_editor::TextEditor;
use super::state::{
    AddTodoFormState, DateMenuState, EntriesListState, EntryFormState, EntryViewState,
    FilterInputState, ListKind, Screen, TodosListState,
};

pub const UNSAVED_WARNING: &str =
    "⚠ Unsaved changes! Press Esc again to discard, or Ctrl+S to save";
pub const DELETE_WARNING: &str =
    "⚠ Delete entry? Press 'd' again to confirm, or any other key to cancel";

/// A status change written through before the store confirmed it.
#[derive(Debug, Clone)]
struct PendingTodoUpdate {
    previous: Todo,
    updated: Todo,
}

/// All controller state. Mutated only through key handling and
/// [`App::apply_core_event`]; both hand back the store commands to dispatch.
pub struct App {
    pub running: bool,
    pub screen: Screen,
    /// First Ctrl+C seen; the next one quits
    pub pending_quit: bool,

    /// Newest first
    pub entries: Vec<Entry>,
    /// Display order as of the last load or move. Status cycling patches in place.
    pub todos: Vec<Todo>,
    /// "@"-prefixed tags across both collections, for autocomplete
    pub available_tags: Vec<String>,

    pub filter: ActiveFilter,
    pub filter_origin: ListKind,
    pub status: Option<Notification>,

    pub entry_form: EntryFormState,
    pub todo_form: AddTodoFormState,
    pub entries_list: EntriesListState,
    pub entry_view: EntryViewState,
    pub todos_list: TodosListState,
    pub filter_input: FilterInputState,
    pub date_menu: DateMenuState,

    tracker: RequestTracker,
    pending_todo_updates: HashMap<RequestId, PendingTodoUpdate>,
    /// Save in flight from the entry form, with the text it was made from
    pending_entry_save: Option<(RequestId, String)>,
    /// Move in flight, with the id of the todo being moved
    pending_move: Option<(RequestId, String)>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            pending_quit: false,
            entries: Vec::new(),
            todos: Vec::new(),
            available_tags: Vec::new(),
            filter: ActiveFilter::default(),
            filter_origin: ListKind::Entries,
            status: None,
            entry_form: EntryFormState::default(),
            todo_form: AddTodoFormState::default(),
            entries_list: EntriesListState::default(),
            entry_view: EntryViewState::default(),
            todos_list: TodosListState::default(),
            filter_input: FilterInputState::default(),
            date_menu: DateMenuState::default(),
            tracker: RequestTracker::new(),
            pending_todo_updates: HashMap::new(),
            pending_entry_save: None,
            pending_move: None,
        }
    }

    /// Commands to issue once the worker is up.
    pub fn startup(&mut self) -> Vec<StoreCommand> {
        self.load_all()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    // =========================================================================
    // Status line
    // =========================================================================

    pub fn set_status(&mut self, notification: Notification) {
        self.status = Some(notification);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Drop an expired status message. Called on every tick.
    pub fn tick(&mut self) {
        if self.status.as_ref().is_some_and(|s| s.is_expired()) {
            self.status = None;
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn load_all(&mut self) -> Vec<StoreCommand> {
        vec![
            StoreCommand::LoadEntries {
                request_id: self.tracker.issue(),
            },
            StoreCommand::LoadTodos {
                request_id: self.tracker.issue(),
            },
        ]
    }

    fn load_todos(&mut self) -> Vec<StoreCommand> {
        vec![StoreCommand::LoadTodos {
            request_id: self.tracker.issue(),
        }]
    }

    /// Switch screens. List and detail screens refresh both collections.
    pub fn navigate(&mut self, screen: Screen) -> Vec<StoreCommand> {
        tracing::debug!(from = ?self.screen, to = ?screen, "navigate");
        self.screen = screen;
        if screen.loads_on_enter() {
            self.load_all()
        } else {
            Vec::new()
        }
    }

    pub fn open_entry_form(&mut self) -> Vec<StoreCommand> {
        self.entry_form = EntryFormState::new(self.screen);
        self.navigate(Screen::EntryForm)
    }

    pub fn open_entry_editor(&mut self, entry: Entry) -> Vec<StoreCommand> {
        self.entry_form = EntryFormState::edit(entry, self.screen);
        self.navigate(Screen::EntryForm)
    }

    pub fn open_todo_form(&mut self) -> Vec<StoreCommand> {
        self.todo_form = AddTodoFormState::new(self.screen);
        self.navigate(Screen::AddTodoForm)
    }

    pub fn open_entries(&mut self) -> Vec<StoreCommand> {
        self.entries_list.pending_delete = false;
        self.navigate(Screen::EntriesList)
    }

    pub fn open_todos(&mut self) -> Vec<StoreCommand> {
        self.navigate(Screen::TodosList)
    }

    pub fn open_selected_entry(&mut self) -> Vec<StoreCommand> {
        let Some(id) = self.selected_entry().map(|e| e.id.clone()) else {
            return Vec::new();
        };
        self.entry_view = EntryViewState {
            entry_id: id,
            scroll: 0,
        };
        self.navigate(Screen::EntryView)
    }

    /// Leave a form for wherever it was opened from.
    pub fn leave_form(&mut self, return_to: Screen) -> Vec<StoreCommand> {
        self.clear_status();
        self.navigate(return_to)
    }

    // =========================================================================
    // Entry form
    // =========================================================================

    pub fn save_entry(&mut self) -> Vec<StoreCommand> {
        if self.entry_form.editor.is_blank() {
            self.set_status(Notification::warning("⚠ Nothing to save"));
            return Vec::new();
        }
        let text = self.entry_form.editor.text.clone();
        let now = Local::now();
        let entry = match self.entry_form.editing.take() {
            Some(mut existing) => {
                existing.apply_content(&text, now);
                existing
            }
            None => Entry::from_content(&text, now),
        };
        self.entry_form.editing = Some(entry.clone());
        self.entry_form.pending_discard = false;

        let request_id = self.tracker.issue();
        self.pending_entry_save = Some((request_id, text.clone()));
        vec![StoreCommand::SaveEntry {
            request_id,
            entry,
            task_titles: extract_task_titles(&text),
        }]
    }

    /// First Esc on a dirty form arms the discard; the second leaves.
    pub fn escape_entry_form(&mut self) -> Vec<StoreCommand> {
        if self.entry_form.is_dirty() && !self.entry_form.pending_discard {
            self.entry_form.pending_discard = true;
            self.set_status(Notification::warning(UNSAVED_WARNING).sticky());
            return Vec::new();
        }
        self.entry_form.pending_discard = false;
        self.leave_form(self.entry_form.return_to)
    }

    // =========================================================================
    // Todo form
    // =========================================================================

    /// Write the form's todo. With `reset` the form clears for the next one;
    /// without it the same record is updated by later saves.
    pub fn save_todo(&mut self, reset: bool) -> Vec<StoreCommand> {
        let title = self.todo_form.editor.text.trim().to_string();
        if title.is_empty() {
            self.set_status(Notification::warning("⚠ Todo title cannot be empty"));
            return Vec::new();
        }
        let mut todo = self.todo_form.draft.clone();
        todo.tags = extract_tags(&title);
        todo.title = title.clone();
        todo.created_at = Local::now();

        if reset {
            self.todo_form.reset();
        } else {
            self.todo_form.draft = todo.clone();
            self.todo_form.saved_title = Some(title);
            self.todo_form.pending_discard = false;
        }
        vec![StoreCommand::AddTodo {
            request_id: self.tracker.issue(),
            todo,
        }]
    }

    pub fn escape_todo_form(&mut self) -> Vec<StoreCommand> {
        if self.todo_form.is_dirty() && !self.todo_form.pending_discard {
            self.todo_form.pending_discard = true;
            self.set_status(Notification::warning(UNSAVED_WARNING).sticky());
            return Vec::new();
        }
        self.todo_form.pending_discard = false;
        self.leave_form(self.todo_form.return_to)
    }

    // =========================================================================
    // Entries list and viewer
    // =========================================================================

    pub fn visible_entries(&self) -> Vec<&Entry> {
        apply_filter(&self.entries, &self.filter, Local::now())
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        let visible = self.visible_entries();
        let index = self.entries_list.selected.min(visible.len().checked_sub(1)?);
        visible.get(index).copied()
    }

    pub fn viewed_entry(&self) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == self.entry_view.entry_id)
    }

    pub fn select_entry(&mut self, delta: isize) {
        let len = self.visible_entries().len();
        self.entries_list.selected = step_index(self.entries_list.selected, delta, len);
    }

    /// First 'd' arms the delete; the second sends it.
    pub fn request_delete(&mut self) -> Vec<StoreCommand> {
        let Some(entry_id) = self.selected_entry().map(|e| e.id.clone()) else {
            return Vec::new();
        };
        if !self.entries_list.pending_delete {
            self.entries_list.pending_delete = true;
            self.set_status(Notification::warning(DELETE_WARNING).sticky());
            return Vec::new();
        }
        self.entries_list.pending_delete = false;
        self.clear_status();
        vec![StoreCommand::DeleteEntry {
            request_id: self.tracker.issue(),
            entry_id,
        }]
    }

    pub fn cancel_delete(&mut self) {
        self.entries_list.pending_delete = false;
        self.clear_status();
    }

    /// Move the viewer to the neighbouring entry in the filtered list.
    pub fn view_adjacent_entry(&mut self, delta: isize) {
        let visible = self.visible_entries();
        let Some(current) = visible.iter().position(|e| e.id == self.entry_view.entry_id) else {
            return;
        };
        let target = step_index(current, delta, visible.len());
        if target == current {
            return;
        }
        let id = visible[target].id.clone();
        self.entries_list.selected = target;
        self.entry_view = EntryViewState {
            entry_id: id,
            scroll: 0,
        };
    }

    pub fn scroll_entry_view(&mut self, delta: i32) {
        let scroll = i32::from(self.entry_view.scroll) + delta;
        self.entry_view.scroll = scroll.clamp(0, i32::from(u16::MAX)) as u16;
    }

    /// Title of the entry a todo points at. Dangling ids resolve to nothing.
    pub fn entry_title(&self, entry_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == entry_id)
            .map(|e| e.title.as_str())
    }

    pub fn entry_todos(&self, entry_id: &str) -> Vec<&Todo> {
        todos_for_entry(&self.todos, entry_id)
    }

    pub fn entry_todo_counts(&self, entry_id: &str) -> TodoCounts {
        TodoCounts::from_todos(self.entry_todos(entry_id))
    }

    // =========================================================================
    // Todos list
    // =========================================================================

    pub fn visible_todos(&self) -> Vec<&Todo> {
        apply_filter(&self.todos, &self.filter, Local::now())
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        let visible = self.visible_todos();
        let index = self.todos_list.selected.min(visible.len().checked_sub(1)?);
        visible.get(index).copied()
    }

    pub fn select_todo(&mut self, delta: isize) {
        let len = self.visible_todos().len();
        self.todos_list.selected = step_index(self.todos_list.selected, delta, len);
    }

    /// Advance the selected todo's status and write it through. The list keeps
    /// its order so the cursor stays on the same row.
    pub fn cycle_selected_todo(&mut self) -> Vec<StoreCommand> {
        let Some(id) = self.selected_todo().map(|t| t.id.clone()) else {
            return Vec::new();
        };
        let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) else {
            return Vec::new();
        };
        let previous = todo.clone();
        todo.status = todo.status.cycle();
        let updated = todo.clone();

        self.set_status(Notification::info(format!(
            "{} {}",
            updated.status.icon(),
            updated.status.label()
        )));
        let request_id = self.tracker.issue();
        self.pending_todo_updates.insert(
            request_id,
            PendingTodoUpdate {
                previous,
                updated: updated.clone(),
            },
        );
        vec![StoreCommand::UpdateTodo {
            request_id,
            todo: updated,
        }]
    }

    /// Swap the selection with the row next to it on screen. Rows hidden by
    /// the filter are never touched.
    pub fn move_selected_todo(&mut self, direction: MoveDirection) -> Vec<StoreCommand> {
        let pair = self.selected_todo().and_then(|selected| {
            let visible = self.visible_todos();
            visible_neighbour(&visible, &selected.id, direction)
                .map(|neighbour| (selected.id.clone(), neighbour.id.clone()))
        });
        let Some((todo_id, neighbour_id)) = pair else {
            return Vec::new();
        };
        let request_id = self.tracker.issue();
        self.pending_move = Some((request_id, todo_id.clone()));
        vec![StoreCommand::MoveTodo {
            request_id,
            todo_id,
            neighbour_id,
        }]
    }

    fn reselect_todo(&mut self, id: &str) {
        if let Some(index) = self.visible_todos().iter().position(|t| t.id == id) {
            self.todos_list.selected = index;
        }
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// '/' on a list: clear an active filter, otherwise open the input.
    pub fn toggle_filter(&mut self, origin: ListKind) -> Vec<StoreCommand> {
        self.filter_origin = origin;
        if self.filter.is_active() {
            self.filter.clear();
            self.reset_list_selection();
            self.set_status(Notification::info("Filters cleared"));
            return Vec::new();
        }
        self.open_filter_input(origin.screen())
    }

    pub fn open_filter_input(&mut self, return_to: Screen) -> Vec<StoreCommand> {
        self.filter_input = FilterInputState {
            editor: TextEditor::with_text(filter_to_input(&self.filter)),
            return_to,
        };
        self.navigate(Screen::TagFilterInput)
    }

    pub fn open_filter_summary(&mut self, origin: ListKind) -> Vec<StoreCommand> {
        self.filter_origin = origin;
        self.navigate(Screen::FilterSummary)
    }

    pub fn open_date_menu(&mut self) -> Vec<StoreCommand> {
        self.date_menu = DateMenuState::select_preset(self.filter.date);
        self.navigate(Screen::DateFilterMenu)
    }

    /// Live completion hint for the filter input.
    pub fn filter_suggestion(&self) -> Option<String> {
        filter_parser::suggest_completion(&self.filter_input.editor.text, &self.available_tags)
    }

    pub fn filter_matches(&self) -> Vec<String> {
        filter_parser::matching_completions(&self.filter_input.editor.text, &self.available_tags)
    }

    pub fn autocomplete_filter(&mut self) {
        if let Some(completed) =
            filter_parser::autocomplete(&self.filter_input.editor.text, &self.available_tags)
        {
            self.filter_input.editor.set_text(completed);
        }
    }

    /// Enter in the filter input. Blank clears everything; a parse error keeps
    /// the current filter and the screen.
    pub fn apply_filter_input(&mut self) -> Vec<StoreCommand> {
        let input = self.filter_input.editor.text.trim().to_string();
        if input.is_empty() {
            self.filter.clear();
            self.reset_list_selection();
            self.set_status(Notification::info("Filters cleared"));
            return self.navigate(self.filter_origin.screen());
        }

        let parsed = parse_filter_input(&input);
        if !parsed.is_ok() {
            self.set_status(Notification::error(format!(
                "{}. Try: {}",
                parsed.errors.join("; "),
                filter_parser::filter_hint()
            )));
            return Vec::new();
        }

        self.filter = ActiveFilter::new(&parsed.tags, parsed.date);
        self.reset_list_selection();
        self.set_status(Notification::info(format!("Filter: {}", self.filter.summary())));
        self.navigate(self.filter_origin.screen())
    }

    pub fn apply_date_choice(&mut self) -> Vec<StoreCommand> {
        self.filter.date = self.date_menu.choice();
        self.reset_list_selection();
        self.navigate(Screen::FilterSummary)
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.reset_list_selection();
        self.set_status(Notification::info("Filters cleared"));
    }

    pub fn return_to_list(&mut self) -> Vec<StoreCommand> {
        self.navigate(self.filter_origin.screen())
    }

    fn reset_list_selection(&mut self) {
        self.entries_list.selected = 0;
        self.todos_list.selected = 0;
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    pub fn week_buckets(&self) -> Vec<WeekBucket> {
        aggregate_by_week(
            &self.entries,
            &self.todos,
            DASHBOARD_WEEKS,
            Local::now().date_naive(),
        )
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        DashboardSummary::compute(&self.entries, &self.todos, Local::now())
    }

    // =========================================================================
    // Store results
    // =========================================================================

    pub fn apply_core_event(&mut self, event: CoreEvent) -> Vec<StoreCommand> {
        match event {
            CoreEvent::EntriesLoaded { request_id, result } => {
                match result {
                    Ok(entries) => {
                        if self.tracker.check_load(Collection::Entries, request_id)
                            == LoadFreshness::Stale
                        {
                            tracing::debug!(%request_id, "discarding stale entries load");
                            return Vec::new();
                        }
                        self.entries = sorted_entries(&entries);
                        self.refresh_derived();
                    }
                    Err(e) => self.set_status(Notification::error(format!(
                        "Failed to load entries: {}",
                        e
                    ))),
                }
                Vec::new()
            }
            CoreEvent::TodosLoaded { request_id, result } => {
                match result {
                    Ok(todos) => {
                        if self.tracker.check_load(Collection::Todos, request_id)
                            == LoadFreshness::Stale
                        {
                            tracing::debug!(%request_id, "discarding stale todos load");
                            return Vec::new();
                        }
                        self.todos = sorted_todos(&todos);
                        self.reapply_pending_updates();
                        self.refresh_derived();
                    }
                    Err(e) => self.set_status(Notification::error(format!(
                        "Failed to load todos: {}",
                        e
                    ))),
                }
                Vec::new()
            }
            CoreEvent::EntrySaved { request_id, result } => {
                let saved_text = match self.pending_entry_save.take() {
                    Some((id, text)) if id == request_id => Some(text),
                    other => {
                        self.pending_entry_save = other;
                        None
                    }
                };
                match result {
                    Ok(report) => {
                        self.tracker.record_write(Collection::Entries, request_id);
                        self.tracker.record_write(Collection::Todos, request_id);
                        let same_entry = self
                            .entry_form
                            .editing
                            .as_ref()
                            .is_some_and(|e| e.id == report.entry.id);
                        if same_entry {
                            if let Some(text) = saved_text {
                                self.entry_form.saved_text = text;
                            }
                            self.entry_form.editing = Some(report.entry);
                        }
                        let message = match report.created_todos {
                            0 => "✓ Saved".to_string(),
                            1 => "✓ Saved (1 todo created)".to_string(),
                            n => format!("✓ Saved ({} todos created)", n),
                        };
                        self.set_status(Notification::success(message));
                        self.load_all()
                    }
                    Err(e) => {
                        self.set_status(Notification::error(format!("Failed to save: {}", e)));
                        Vec::new()
                    }
                }
            }
            CoreEvent::TodoAdded { request_id, result } => match result {
                Ok(todo) => {
                    self.tracker.record_write(Collection::Todos, request_id);
                    tracing::debug!(todo_id = %todo.id, "todo added");
                    self.set_status(Notification::success("✓ Todo saved"));
                    self.load_todos()
                }
                Err(e) => {
                    self.set_status(Notification::error(format!("Failed to save todo: {}", e)));
                    Vec::new()
                }
            },
            CoreEvent::TodoUpdated {
                request_id,
                todo_id,
                result,
            } => {
                let pending = self.pending_todo_updates.remove(&request_id);
                match result {
                    Ok(_) => self.tracker.record_write(Collection::Todos, request_id),
                    Err(e) => {
                        if let Some(pending) = pending {
                            if let Some(todo) = self.todos.iter_mut().find(|t| t.id == todo_id) {
                                *todo = pending.previous;
                            }
                        }
                        self.set_status(Notification::error(format!(
                            "Failed to update todo: {}",
                            e
                        )));
                    }
                }
                Vec::new()
            }
            CoreEvent::TodoMoved { request_id, result } => {
                let moved_id = match self.pending_move.take() {
                    Some((id, todo_id)) if id == request_id => Some(todo_id),
                    other => {
                        self.pending_move = other;
                        None
                    }
                };
                match result {
                    Ok(MoveOutcome::Moved(todos)) => {
                        self.tracker.record_write(Collection::Todos, request_id);
                        self.todos = todos;
                        self.reapply_pending_updates();
                        if let Some(id) = moved_id {
                            self.reselect_todo(&id);
                        }
                    }
                    Ok(MoveOutcome::Unchanged) => {}
                    Err(e) => {
                        self.set_status(Notification::error(format!("Failed to move todo: {}", e)))
                    }
                }
                Vec::new()
            }
            CoreEvent::EntryDeleted {
                request_id,
                entry_id,
                result,
            } => match result {
                Ok(true) => {
                    self.tracker.record_write(Collection::Entries, request_id);
                    self.entries.retain(|e| e.id != entry_id);
                    self.clamp_selections();
                    self.set_status(Notification::success("✓ Entry deleted"));
                    self.load_all()
                }
                Ok(false) => {
                    self.set_status(Notification::warning("Entry was already deleted"));
                    self.load_all()
                }
                Err(e) => {
                    self.set_status(Notification::error(format!("Failed to delete: {}", e)));
                    Vec::new()
                }
            },
        }
    }

    /// Status changes still in flight win over whatever a load brought back.
    fn reapply_pending_updates(&mut self) {
        for pending in self.pending_todo_updates.values() {
            if let Some(todo) = self.todos.iter_mut().find(|t| t.id == pending.updated.id) {
                todo.status = pending.updated.status;
            }
        }
    }

    fn refresh_derived(&mut self) {
        self.available_tags = unique_tags(&self.entries, &self.todos);
        self.clamp_selections();
    }

    fn clamp_selections(&mut self) {
        let entries = self.visible_entries().len();
        let todos = self.visible_todos().len();
        self.entries_list.selected = self.entries_list.selected.min(entries.saturating_sub(1));
        self.todos_list.selected = self.todos_list.selected.min(todos.saturating_sub(1));
    }
}

/// Move an index by `delta`, staying inside `0..len`.
fn step_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

/// Text that parses back into `filter`, used to prefill the filter input.
fn filter_to_input(filter: &ActiveFilter) -> String {
    let mut parts: Vec<String> = filter.tags.iter().map(|t| format!("@{}", t)).collect();
    if let Some(preset) = filter.date {
        parts.push(preset.phrase().to_string());
    }
    parts.join(" ")
}

/// Rows shown by the date menu, "Any date" first.
pub fn date_menu_labels() -> Vec<&'static str> {
    std::iter::once("Any date")
        .chain(DatePreset::ALL.iter().map(|p| p.label()))
        .collect()
}
