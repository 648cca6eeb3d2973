//! File-backed key/value store for state that outlives the process.
//!
//! The file is a JSON object mapping namespaced keys to arbitrary JSON
//! values, plus a timestamp of the last write. Each write rewrites the
//! whole file; values under other keys are kept.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// On-disk layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    /// When the file was last written.
    updated_at: Option<DateTime<Utc>>,
    /// Stored values by key.
    #[serde(default)]
    entries: BTreeMap<String, serde_json::Value>,
}

/// A JSON file holding namespaced values.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<StoreFile, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreFile::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            key: "<file>".to_string(),
            source,
        })
    }

    /// Read the value stored under `key`.
    ///
    /// A missing file or missing key gives `Ok(None)`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let file = self.read_file()?;
        file.entries
            .get(key)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|source| StoreError::Json {
                    key: key.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Store `value` under `key`, creating the file and its parent
    /// directories if needed.
    ///
    /// An unreadable existing file is replaced rather than merged.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let mut file = self.read_file().unwrap_or_default();

        let value = serde_json::to_value(value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;
        file.entries.insert(key.to_string(), value);
        file.updated_at = Some(Utc::now());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(&file).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;

        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_empty() {
        let store = LocalStore::new("/nonexistent/path/store.json");
        let value: Option<Vec<String>> = store.get("anything").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn set_then_get() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("store.json"));

        store.set("greeting", &vec!["hello".to_string()]).unwrap();
        let value: Option<Vec<String>> = store.get("greeting").unwrap();
        assert_eq!(value, Some(vec!["hello".to_string()]));
    }

    #[test]
    fn set_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("store.json"));

        store.set("a", &1).unwrap();
        store.set("b", &2).unwrap();

        assert_eq!(store.get::<i32>("a").unwrap(), Some(1));
        assert_eq!(store.get::<i32>("b").unwrap(), Some(2));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("store.json");
        let store = LocalStore::new(&path);

        store.set("k", &"v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_an_error_on_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = LocalStore::new(&path);
        assert!(matches!(
            store.get::<Vec<String>>("k"),
            Err(StoreError::Json { .. })
        ));
    }

    #[test]
    fn corrupt_file_is_replaced_on_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = LocalStore::new(&path);
        store.set("k", &3).unwrap();
        assert_eq!(store.get::<i32>("k").unwrap(), Some(3));
    }

    #[test]
    fn wrong_value_type_is_an_error() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("store.json"));
        store.set("k", &"text").unwrap();
        assert!(store.get::<Vec<String>>("k").is_err());
    }
}
