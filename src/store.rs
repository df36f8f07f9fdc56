//! A file based key/value store.
//!
//! Intended as a dummy replacing a true database for tests and development;
//! the command layer only ever talks to it through `get`, `get_all` and
//! `set`. Each call loads the whole JSON document and `set` rewrites it, so
//! concurrent writers on the same file are not supported.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// JSON-file-backed map from string keys to values of one stored type.
///
/// Data lives at `<store_directory>/<type_name>/<type_name>.json`; the
/// directory is created on first save and a missing file reads as an empty
/// store.
pub struct FileStore<T> {
    directory: PathBuf,
    type_name: String,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> FileStore<T> {
    /// `store_directory` is the base directory in the file system;
    /// `type_name` identifies the stored data type, like a table name.
    pub fn new(store_directory: &str, type_name: &str) -> Self {
        Self {
            directory: PathBuf::from(store_directory).join(type_name),
            type_name: type_name.to_string(),
            _marker: std::marker::PhantomData,
        }
    }

    fn file_path(&self) -> PathBuf {
        self.directory.join(format!("{}.json", self.type_name))
    }

    /// Retrieves the element at `key`, or `None` when absent.
    pub fn get(&self, key: &str) -> Result<Option<T>> {
        let mut data = self.load()?;
        Ok(data.remove(key))
    }

    /// Retrieves every stored element, in key order.
    pub fn get_all(&self) -> Result<Vec<T>> {
        Ok(self.load()?.into_values().collect())
    }

    /// Sets the element at `key`, replacing existing data.
    pub fn set(&self, key: &str, value: T) -> Result<()> {
        let mut data = self.load()?;
        data.insert(key.to_string(), value);
        self.save(&data)
    }

    fn load(&self) -> Result<BTreeMap<String, T>> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("reading store file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing store file {}", path.display()))
    }

    fn save(&self, data: &BTreeMap<String, T>) -> Result<()> {
        fs::create_dir_all(&self.directory)
            .with_context(|| format!("creating store directory {}", self.directory.display()))?;
        let path = self.file_path();
        let contents = serde_json::to_string_pretty(data)?;
        fs::write(&path, contents)
            .with_context(|| format!("writing store file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore<String> {
        FileStore::new(dir.path().to_str().unwrap(), "entries")
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("greeting", "hello".to_string()).unwrap();
        assert_eq!(store.get("greeting").unwrap(), Some("hello".to_string()));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn test_set_replaces_existing_data() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("key", "first".to_string()).unwrap();
        store.set("key", "second".to_string()).unwrap();
        assert_eq!(store.get("key").unwrap(), Some("second".to_string()));
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_get_all_returns_values_in_key_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("b", "2".to_string()).unwrap();
        store.set("a", "1".to_string()).unwrap();
        assert_eq!(
            store.get_all().unwrap(),
            vec!["1".to_string(), "2".to_string()]
        );
    }

    #[test]
    fn test_two_stores_on_the_same_directory_see_each_other() {
        let dir = TempDir::new().unwrap();
        let writer = store_in(&dir);
        writer.set("shared", "value".to_string()).unwrap();
        let reader = store_in(&dir);
        assert_eq!(reader.get("shared").unwrap(), Some("value".to_string()));
    }
}
