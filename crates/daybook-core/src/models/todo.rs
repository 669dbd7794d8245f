use std::collections::BTreeSet;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::{generate_id, Identified, Tagged, Timestamped};
use crate::content::extract_tags;

/// Lifecycle state of a todo. Anything unrecognized on disk reads as `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TodoStatus {
    #[default]
    Open,
    Next,
    Done,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Next => "next",
            Self::Done => "done",
        }
    }

    /// Sort rank: next before open before done.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Next => 0,
            Self::Open => 1,
            Self::Done => 2,
        }
    }

    /// open -> next -> done -> open
    pub fn cycle(&self) -> Self {
        match self {
            Self::Open => Self::Next,
            Self::Next => Self::Done,
            Self::Done => Self::Open,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Open => "○",
            Self::Next => "→",
            Self::Done => "✓",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Next => "Next",
            Self::Done => "Done",
        }
    }
}

impl From<String> for TodoStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "next" => Self::Next,
            "done" => Self::Done,
            _ => Self::Open,
        }
    }
}

impl From<TodoStatus> for String {
    fn from(value: TodoStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: TodoStatus,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Local>,
    /// Entry this todo was extracted from. May point at a deleted entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    #[serde(default)]
    pub position: i64,
}

impl Todo {
    pub fn new(
        title: impl Into<String>,
        entry_id: Option<String>,
        position: i64,
        now: DateTime<Local>,
    ) -> Self {
        let title = title.into();
        let tags = extract_tags(&title);
        Self {
            id: generate_id(),
            title,
            status: TodoStatus::Open,
            tags,
            created_at: now,
            entry_id,
            position,
        }
    }
}

impl Identified for Todo {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Tagged for Todo {
    fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

impl Timestamped for Todo {
    fn timestamp(&self) -> DateTime<Local> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_cycle_is_closed() {
        let mut status = TodoStatus::Open;
        let mut seen = Vec::new();
        for _ in 0..3 {
            status = status.cycle();
            seen.push(status);
        }
        assert_eq!(seen, vec![TodoStatus::Next, TodoStatus::Done, TodoStatus::Open]);
    }

    #[test]
    fn test_unknown_status_reads_as_open() {
        let json = r#"{"id":"t1","title":"x","status":"blocked","created_at":"2024-10-14T09:00:00+00:00"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.status, TodoStatus::Open);
        assert_eq!(todo.status.cycle(), TodoStatus::Next);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let now = Local.with_ymd_and_hms(2024, 10, 14, 9, 0, 0).unwrap();
        let mut todo = Todo::new("Call @Bob", None, 0, now);
        todo.status = TodoStatus::Next;
        let json = serde_json::to_string(&todo).unwrap();
        assert!(json.contains("\"status\":\"next\""));
        assert!(!json.contains("entry_id"));
        assert!(todo.tags.contains("bob"));
    }

    #[test]
    fn test_rank_orders_next_open_done() {
        assert!(TodoStatus::Next.rank() < TodoStatus::Open.rank());
        assert!(TodoStatus::Open.rank() < TodoStatus::Done.rank());
    }
}
