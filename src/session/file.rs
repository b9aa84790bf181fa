//! JSON-file-backed session store.
//!
//! Used when `--session-file` is given: the whole store is one JSON object
//! rewritten on every save, which is cheap at dashboard scale and survives
//! restarting the binary within the same login session.

use super::SessionStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct FileStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or create) a file-backed store at `path`. An unreadable or
    /// corrupt document starts the session empty rather than failing.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::read_document(&path).unwrap_or_default();
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn read_document(path: &Path) -> Option<HashMap<String, String>> {
        let raw = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(values) => Some(values),
            Err(err) => {
                tracing::warn!("session: corrupt store at {}: {err}", path.display());
                None
            }
        }
    }

    fn flush(&self, values: &HashMap<String, String>) {
        let json = match serde_json::to_string_pretty(values) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("session: failed to serialize store: {err}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!("session: cannot create {}: {err}", parent.display());
                return;
            }
        }
        if let Err(err) = std::fs::write(&self.path, json) {
            tracing::warn!("session: cannot write {}: {err}", self.path.display());
        }
    }
}

impl SessionStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .map(|values| values.get(key).cloned())
            .unwrap_or_default()
    }

    fn save(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
            self.flush(&values);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            if values.remove(key).is_some() {
                self.flush(&values);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = FileStore::open(&path);
            store.save("dash_input", "half-typed complaint");
        }

        let store = FileStore::open(&path);
        assert_eq!(
            store.load("dash_input").as_deref(),
            Some("half-typed complaint")
        );
    }

    #[test]
    fn test_corrupt_document_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{{{{").unwrap();

        let store = FileStore::open(&path);
        assert!(store.load("dash_input").is_none());
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path);
        store.save("k", "v");
        store.remove("k");
        drop(store);

        let store = FileStore::open(&path);
        assert!(store.load("k").is_none());
    }
}
