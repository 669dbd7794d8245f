use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::StoreError;
use crate::models::Identified;

/// A whole-file JSON collection. Every mutation is load, change, rewrite.
#[derive(Debug, Clone)]
pub struct JsonCollection<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Identified + Clone,
{
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        }
    }

    /// Read every record. A missing file is an empty collection.
    pub fn load_all(&self) -> Result<Vec<T>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the file with `records`, written to a sibling temp file first and
    /// renamed into place so readers never see a half-written array.
    pub fn save_all(&self, records: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(write_err)?;
        fs::rename(&tmp_path, &self.path).map_err(write_err)?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "collection saved");
        Ok(())
    }

    /// Replace the record with the same id, or append it.
    pub fn upsert(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        self.save_all(&records)
    }

    /// Drop the record with `id`. Returns whether anything was removed; the file
    /// is only rewritten when it was.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save_all(&records)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Todo};
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    fn now() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2024, 10, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store: JsonCollection<Entry> = JsonCollection::new(dir.path().join("entries.json"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_created_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("todos.json");
        let store: JsonCollection<Todo> = JsonCollection::new(&path);
        store.save_all(&[Todo::new("x", None, 0, now())]).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, "[{not json").unwrap();
        let store: JsonCollection<Entry> = JsonCollection::new(&path);
        assert!(matches!(store.load_all(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_save_load_save_is_byte_stable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entries.json");
        let store: JsonCollection<Entry> = JsonCollection::new(&path);

        let mut linked = Entry::from_content("Linked @work\n!todo thing", now());
        linked.todo_ids.push("t1".into());
        store
            .save_all(&[Entry::from_content("Plain", now()), linked])
            .unwrap();
        let first = fs::read_to_string(&path).unwrap();

        let loaded = store.load_all().unwrap();
        store.save_all(&loaded).unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("[\n  {\n    \"id\""));
    }

    #[test]
    fn test_upsert_replaces_or_appends() {
        let dir = TempDir::new().unwrap();
        let store: JsonCollection<Todo> = JsonCollection::new(dir.path().join("todos.json"));
        let mut todo = Todo::new("first", None, 1, now());
        store.upsert(todo.clone()).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 1);

        todo.title = "renamed".into();
        store.upsert(todo.clone()).unwrap();
        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "renamed");

        store.upsert(Todo::new("second", None, 2, now())).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store: JsonCollection<Entry> = JsonCollection::new(dir.path().join("entries.json"));
        let entry = Entry::from_content("bye", now());
        store.upsert(entry.clone()).unwrap();
        assert!(store.remove(&entry.id).unwrap());
        assert!(!store.remove(&entry.id).unwrap());
        assert!(store.load_all().unwrap().is_empty());
    }
}
