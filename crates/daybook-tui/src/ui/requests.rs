//! Bookkeeping for in-flight store commands.
//!
//! Results come back on a channel and are treated as arriving in any order. A
//! load is only applied when nothing newer has already been applied or written
//! for the same collection.

use daybook_core::events::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Entries,
    Todos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFreshness {
    Fresh,
    /// Older than a load already applied or a write already completed
    Stale,
}

#[derive(Debug, Default, Clone, Copy)]
struct CollectionMarks {
    applied_load: Option<RequestId>,
    completed_write: Option<RequestId>,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    last_issued: RequestId,
    entries: CollectionMarks,
    todos: CollectionMarks,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next request id.
    pub fn issue(&mut self) -> RequestId {
        self.last_issued = self.last_issued.next();
        self.last_issued
    }

    fn marks_mut(&mut self, collection: Collection) -> &mut CollectionMarks {
        match collection {
            Collection::Entries => &mut self.entries,
            Collection::Todos => &mut self.todos,
        }
    }

    /// Decide whether a load result may replace current state, and record it
    /// when it may.
    pub fn check_load(&mut self, collection: Collection, id: RequestId) -> LoadFreshness {
        let marks = self.marks_mut(collection);
        let newer_seen = marks.applied_load.map_or(false, |applied| id < applied)
            || marks.completed_write.map_or(false, |written| id < written);
        if newer_seen {
            return LoadFreshness::Stale;
        }
        marks.applied_load = Some(id);
        LoadFreshness::Fresh
    }

    /// Note that a write to `collection` has completed.
    pub fn record_write(&mut self, collection: Collection, id: RequestId) {
        let marks = self.marks_mut(collection);
        if marks.completed_write.map_or(true, |written| id > written) {
            marks.completed_write = Some(id);
        }
    }
}
