//! Bounded most-recent-first history with JSON persistence.
//!
//! # Example
//!
//! ```rust
//! use droplist::recent::RecentStore;
//!
//! let mut recent = RecentStore::new(3);
//! recent.push("rust");
//! recent.push("go");
//! recent.push("rust");
//!
//! assert_eq!(recent.items(), &["rust", "go"]);
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors from loading or saving a [`RecentStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("recent store i/o: {0}")]
    Io(#[from] io::Error),
    /// The backing file does not hold a JSON array of entries.
    #[error("recent store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A capacity-bounded list, newest first, with no duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentStore<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: PartialEq> RecentStore<T> {
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// A capacity of zero keeps nothing.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries, newest first.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records `item` as the newest entry. An equal entry already present
    /// moves to the front; the oldest entry is evicted past capacity.
    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        self.items.retain(|existing| *existing != item);
        self.items.insert(0, item);
        self.items.truncate(self.capacity);
    }

    /// Removes an entry. Returns whether it was present.
    pub fn remove(&mut self, item: &T) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| existing != item);
        before != self.items.len()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: PartialEq + Serialize + DeserializeOwned> RecentStore<T> {
    /// Loads a store from `path`.
    ///
    /// A missing file yields an empty store. Entries beyond `capacity` and
    /// duplicates are dropped, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read and
    /// [`StoreError::Json`] if it is not a JSON array of entries.
    pub fn load(path: &Path, capacity: usize) -> Result<Self, StoreError> {
        let mut store = Self::new(capacity);
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no recent store yet");
                return Ok(store);
            }
            Err(err) => return Err(err.into()),
        };
        let entries: Vec<T> = serde_json::from_str(&text)?;
        // Push oldest first so the file's order is preserved.
        for entry in entries.into_iter().rev() {
            store.push(entry);
        }
        debug!(path = %path.display(), entries = store.len(), "recent store loaded");
        Ok(store)
    }

    /// Writes the store to `path` as a JSON array, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or any filesystem operation
    /// fails.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.items)?;
        fs::write(path, json)?;
        debug!(path = %path.display(), entries = self.len(), "recent store saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_dedupes_to_front() {
        let mut store = RecentStore::new(5);
        store.push(1);
        store.push(2);
        store.push(3);
        store.push(1);
        assert_eq!(store.items(), &[1, 3, 2]);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut store = RecentStore::new(2);
        store.push("a");
        store.push("b");
        store.push("c");
        assert_eq!(store.items(), &["c", "b"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut store = RecentStore::new(0);
        store.push("a");
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = RecentStore::new(4);
        store.push("a");
        store.push("b");
        assert!(store.remove(&"a"));
        assert!(!store.remove(&"a"));
        assert_eq!(store.items(), &["b"]);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("recent.json");

        let mut store = RecentStore::new(3);
        store.push("oldest".to_string());
        store.push("middle".to_string());
        store.push("newest".to_string());
        store.save(&path).unwrap();

        let loaded: RecentStore<String> = RecentStore::load(&path, 3).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_load_truncates_to_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");
        fs::write(&path, r#"["a", "b", "a", "c", "d"]"#).unwrap();

        let loaded: RecentStore<String> = RecentStore::load(&path, 2).unwrap();
        assert_eq!(loaded.items(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: RecentStore<String> =
            RecentStore::load(&dir.path().join("absent.json"), 4).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.capacity(), 4);
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");
        fs::write(&path, "{not json").unwrap();

        let err = RecentStore::<String>::load(&path, 4).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
        assert!(err.to_string().starts_with("recent store is not valid JSON"));
    }
}
