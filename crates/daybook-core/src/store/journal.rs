use chrono::{DateTime, Local};

use super::{JsonCollection, StoreError};
use crate::config::CoreConfig;
use crate::models::{Entry, Todo};
use crate::ordering::{self, MoveOutcome};

/// Result of saving an entry together with its extracted tasks.
#[derive(Debug, Clone)]
pub struct EntrySaveReport {
    /// The entry as written, with `todo_ids` filled in
    pub entry: Entry,
    pub created_todos: usize,
    pub reused_todos: usize,
}

/// Both collections plus the composite operations the UI needs.
#[derive(Debug, Clone)]
pub struct JournalStore {
    entries: JsonCollection<Entry>,
    todos: JsonCollection<Todo>,
}

fn max_position(todos: &[Todo]) -> i64 {
    todos.iter().map(|t| t.position).max().unwrap_or(0)
}

impl JournalStore {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            entries: JsonCollection::new(config.entries_path()),
            todos: JsonCollection::new(config.todos_path()),
        }
    }

    pub fn load_entries(&self) -> Result<Vec<Entry>, StoreError> {
        self.entries.load_all()
    }

    pub fn load_todos(&self) -> Result<Vec<Todo>, StoreError> {
        self.todos.load_all()
    }

    /// Persist `entry` and the todos named by `task_titles`.
    ///
    /// Titles that match one of the entry's existing todos reuse it; the rest
    /// become new todos appended after the current highest position. Todos whose
    /// line disappeared from the text are left alone.
    pub fn save_entry(
        &self,
        mut entry: Entry,
        task_titles: &[String],
        now: DateTime<Local>,
    ) -> Result<EntrySaveReport, StoreError> {
        let mut todos = self.todos.load_all()?;
        let mut next_position = max_position(&todos) + 1;

        let mut claimed: Vec<String> = Vec::new();
        let mut todo_ids = Vec::with_capacity(task_titles.len());
        let mut created = Vec::new();

        for title in task_titles {
            let existing = todos.iter().find(|t| {
                t.entry_id.as_deref() == Some(entry.id.as_str())
                    && t.title == *title
                    && !claimed.contains(&t.id)
            });
            match existing {
                Some(todo) => {
                    claimed.push(todo.id.clone());
                    todo_ids.push(todo.id.clone());
                }
                None => {
                    let todo = Todo::new(title.clone(), Some(entry.id.clone()), next_position, now);
                    next_position += 1;
                    todo_ids.push(todo.id.clone());
                    created.push(todo);
                }
            }
        }

        let created_todos = created.len();
        if !created.is_empty() {
            todos.extend(created);
            self.todos.save_all(&todos)?;
        }

        entry.todo_ids = todo_ids;
        self.entries.upsert(entry.clone())?;

        tracing::info!(
            entry_id = %entry.id,
            created = created_todos,
            reused = claimed.len(),
            "entry saved"
        );
        Ok(EntrySaveReport {
            entry,
            created_todos,
            reused_todos: claimed.len(),
        })
    }

    /// Save a standalone todo. A new id is appended after the current highest
    /// position; saving the same id again updates it in place and keeps its
    /// position and status.
    pub fn add_todo(&self, mut todo: Todo) -> Result<Todo, StoreError> {
        let mut todos = self.todos.load_all()?;
        match todos.iter_mut().find(|t| t.id == todo.id) {
            Some(existing) => {
                existing.title = todo.title;
                existing.tags = todo.tags;
                todo = existing.clone();
            }
            None => {
                todo.position = max_position(&todos) + 1;
                todos.push(todo.clone());
            }
        }
        self.todos.save_all(&todos)?;
        tracing::info!(todo_id = %todo.id, position = todo.position, "todo saved");
        Ok(todo)
    }

    /// Write one todo back by id.
    pub fn update_todo(&self, todo: Todo) -> Result<Todo, StoreError> {
        self.todos.upsert(todo.clone())?;
        Ok(todo)
    }

    /// Swap a todo with a same-status neighbour. Nothing is written when it cannot move.
    pub fn move_todo(&self, id: &str, neighbour_id: &str) -> Result<MoveOutcome, StoreError> {
        let todos = self.todos.load_all()?;
        if !todos.iter().any(|t| t.id == id) {
            return Err(StoreError::TodoNotFound(id.to_string()));
        }
        let outcome = ordering::move_todo(&todos, id, neighbour_id);
        if let MoveOutcome::Moved(reordered) = &outcome {
            self.todos.save_all(reordered)?;
            tracing::debug!(todo_id = id, neighbour_id, "todo moved");
        }
        Ok(outcome)
    }

    /// Remove an entry. Its todos stay, with a dangling `entry_id`.
    pub fn delete_entry(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.entries.remove(id)?;
        tracing::info!(entry_id = id, removed, "entry deleted");
        Ok(removed)
    }
}
