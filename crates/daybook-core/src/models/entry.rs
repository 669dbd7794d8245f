use std::collections::BTreeSet;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::{generate_id, Identified, Tagged, Timestamped};
use crate::content::{extract_tags, split_title_body};

/// A free-text journal entry.
///
/// `title`, `body` and `tags` are derived from the text on every save; `todo_ids`
/// lists the todos created from `!todo` lines, in text order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub todo_ids: Vec<String>,
}

impl Entry {
    /// Build an unsaved entry from raw text. The id is assigned now and never changes.
    pub fn from_content(text: &str, now: DateTime<Local>) -> Self {
        let mut entry = Self {
            id: generate_id(),
            title: String::new(),
            body: String::new(),
            tags: BTreeSet::new(),
            timestamp: now,
            todo_ids: Vec::new(),
        };
        entry.apply_content(text, now);
        entry
    }

    /// Re-derive title, body and tags from edited text and bump the timestamp.
    pub fn apply_content(&mut self, text: &str, now: DateTime<Local>) {
        let (title, body) = split_title_body(text);
        self.title = title;
        self.body = body;
        self.tags = extract_tags(text);
        self.timestamp = now;
    }

    /// Text suitable for loading back into an editor.
    pub fn compose_content(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n{}", self.title, self.body)
        }
    }
}

impl Identified for Entry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Tagged for Entry {
    fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

impl Timestamped for Entry {
    fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}
