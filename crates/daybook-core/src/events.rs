use crate::models::{Entry, Todo};
use crate::ordering::MoveOutcome;
use crate::store::EntrySaveReport;

/// Monotonic id stamped on every command so late results can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Results coming back from the store worker. Errors are rendered to strings
/// at the worker boundary.
#[derive(Debug, Clone)]
pub enum CoreEvent {
    EntriesLoaded {
        request_id: RequestId,
        result: Result<Vec<Entry>, String>,
    },
    TodosLoaded {
        request_id: RequestId,
        result: Result<Vec<Todo>, String>,
    },
    EntrySaved {
        request_id: RequestId,
        result: Result<EntrySaveReport, String>,
    },
    TodoAdded {
        request_id: RequestId,
        result: Result<Todo, String>,
    },
    TodoUpdated {
        request_id: RequestId,
        todo_id: String,
        result: Result<Todo, String>,
    },
    TodoMoved {
        request_id: RequestId,
        result: Result<MoveOutcome, String>,
    },
    EntryDeleted {
        request_id: RequestId,
        entry_id: String,
        result: Result<bool, String>,
    },
}

impl CoreEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            Self::EntriesLoaded { request_id, .. }
            | Self::TodosLoaded { request_id, .. }
            | Self::EntrySaved { request_id, .. }
            | Self::TodoAdded { request_id, .. }
            | Self::TodoUpdated { request_id, .. }
            | Self::TodoMoved { request_id, .. }
            | Self::EntryDeleted { request_id, .. } => *request_id,
        }
    }
}
