use std::sync::mpsc::{Receiver, Sender};

use chrono::Local;

use crate::events::{CoreEvent, RequestId};
use crate::models::{Entry, Todo};
use crate::store::JournalStore;

/// Work for the store thread. Every variant but `Shutdown` produces exactly one
/// [`CoreEvent`].
#[derive(Debug, Clone)]
pub enum StoreCommand {
    LoadEntries {
        request_id: RequestId,
    },
    LoadTodos {
        request_id: RequestId,
    },
    SaveEntry {
        request_id: RequestId,
        entry: Entry,
        task_titles: Vec<String>,
    },
    AddTodo {
        request_id: RequestId,
        todo: Todo,
    },
    UpdateTodo {
        request_id: RequestId,
        todo: Todo,
    },
    MoveTodo {
        request_id: RequestId,
        todo_id: String,
        neighbour_id: String,
    },
    DeleteEntry {
        request_id: RequestId,
        entry_id: String,
    },
    Shutdown,
}

/// Owns the store and handles commands strictly in arrival order, so two
/// read-modify-write cycles on the same file never interleave.
pub struct StoreWorker {
    store: JournalStore,
    command_rx: Receiver<StoreCommand>,
    event_tx: Sender<CoreEvent>,
}

impl StoreWorker {
    pub fn new(
        store: JournalStore,
        command_rx: Receiver<StoreCommand>,
        event_tx: Sender<CoreEvent>,
    ) -> Self {
        Self {
            store,
            command_rx,
            event_tx,
        }
    }

    pub fn run(self) {
        tracing::debug!("store worker started");
        while let Ok(command) = self.command_rx.recv() {
            let Some(event) = self.handle(command) else {
                break;
            };
            if self.event_tx.send(event).is_err() {
                tracing::warn!("event receiver dropped, stopping store worker");
                break;
            }
        }
        tracing::debug!("store worker stopped");
    }

    /// Execute one command. `None` means shut down.
    pub fn handle(&self, command: StoreCommand) -> Option<CoreEvent> {
        let event = match command {
            StoreCommand::LoadEntries { request_id } => CoreEvent::EntriesLoaded {
                request_id,
                result: self.store.load_entries().map_err(|e| e.to_string()),
            },
            StoreCommand::LoadTodos { request_id } => CoreEvent::TodosLoaded {
                request_id,
                result: self.store.load_todos().map_err(|e| e.to_string()),
            },
            StoreCommand::SaveEntry {
                request_id,
                entry,
                task_titles,
            } => CoreEvent::EntrySaved {
                request_id,
                result: self
                    .store
                    .save_entry(entry, &task_titles, Local::now())
                    .map_err(|e| e.to_string()),
            },
            StoreCommand::AddTodo { request_id, todo } => CoreEvent::TodoAdded {
                request_id,
                result: self.store.add_todo(todo).map_err(|e| e.to_string()),
            },
            StoreCommand::UpdateTodo { request_id, todo } => CoreEvent::TodoUpdated {
                request_id,
                todo_id: todo.id.clone(),
                result: self.store.update_todo(todo).map_err(|e| e.to_string()),
            },
            StoreCommand::MoveTodo {
                request_id,
                todo_id,
                neighbour_id,
            } => CoreEvent::TodoMoved {
                request_id,
                result: self
                    .store
                    .move_todo(&todo_id, &neighbour_id)
                    .map_err(|e| e.to_string()),
            },
            StoreCommand::DeleteEntry {
                request_id,
                entry_id,
            } => {
                let result = self.store.delete_entry(&entry_id).map_err(|e| e.to_string());
                CoreEvent::EntryDeleted {
                    request_id,
                    entry_id,
                    result,
                }
            }
            StoreCommand::Shutdown => return None,
        };

        if let Err(message) = event_error(&event) {
            tracing::error!(request_id = %event.request_id(), error = %message, "store command failed");
        }
        Some(event)
    }
}

fn event_error(event: &CoreEvent) -> Result<(), &str> {
    let err = match event {
        CoreEvent::EntriesLoaded { result, .. } => result.as_ref().err(),
        CoreEvent::TodosLoaded { result, .. } => result.as_ref().err(),
        CoreEvent::EntrySaved { result, .. } => result.as_ref().err(),
        CoreEvent::TodoAdded { result, .. } => result.as_ref().err(),
        CoreEvent::TodoUpdated { result, .. } => result.as_ref().err(),
        CoreEvent::TodoMoved { result, .. } => result.as_ref().err(),
        CoreEvent::EntryDeleted { result, .. } => result.as_ref().err(),
    };
    match err {
        Some(message) => Err(message.as_str()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn worker(dir: &TempDir) -> (StoreWorker, Sender<StoreCommand>, Receiver<CoreEvent>) {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let store = JournalStore::new(&CoreConfig::new(dir.path()));
        (StoreWorker::new(store, command_rx, event_tx), command_tx, event_rx)
    }

    #[test]
    fn test_commands_are_answered_in_order() {
        let dir = TempDir::new().unwrap();
        let (worker, command_tx, event_rx) = worker(&dir);

        let todo = Todo::new("write tests", None, 0, Local::now());
        command_tx
            .send(StoreCommand::AddTodo {
                request_id: RequestId(1),
                todo,
            })
            .unwrap();
        command_tx
            .send(StoreCommand::LoadTodos {
                request_id: RequestId(2),
            })
            .unwrap();
        command_tx.send(StoreCommand::Shutdown).unwrap();
        worker.run();

        let events: Vec<CoreEvent> = event_rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], CoreEvent::TodoAdded { request_id: RequestId(1), result: Ok(_) }));
        match &events[1] {
            CoreEvent::TodosLoaded { request_id, result: Ok(todos) } => {
                assert_eq!(*request_id, RequestId(2));
                assert_eq!(todos.len(), 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_errors_become_strings() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("entries.json"), "not json").unwrap();
        let (worker, _command_tx, _event_rx) = worker(&dir);

        let event = worker
            .handle(StoreCommand::LoadEntries {
                request_id: RequestId(7),
            })
            .unwrap();
        match event {
            CoreEvent::EntriesLoaded { result: Err(message), .. } => {
                assert!(message.starts_with("Failed to parse"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_shutdown_returns_none() {
        let dir = TempDir::new().unwrap();
        let (worker, _command_tx, _event_rx) = worker(&dir);
        assert!(worker.handle(StoreCommand::Shutdown).is_none());
    }
}
