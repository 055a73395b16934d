//! Memory store implementations
//!
//! `JsonFileStore` keeps one JSON file per user id under a configurable
//! directory; `InMemoryStore` backs tests and ephemeral runs.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::errors::{CoachError, Result};

/// Repository of per-user memory documents keyed by user id.
///
/// Missing users yield an empty JSON object rather than an error; writes are
/// unconditional overwrites.
pub trait MemoryStore: Send + Sync {
    /// Load the document for a user, empty object if absent
    fn get(&self, user_id: &str) -> Result<Value>;

    /// Overwrite the document for a user
    fn put(&self, user_id: &str, document: &Value) -> Result<()>;

    /// Remove the document for a user (no-op if absent)
    fn delete(&self, user_id: &str) -> Result<()>;
}

/// File store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding one memory file per user
    pub storage_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let storage_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tutorbuddy")
            .join("memory");

        Self { storage_dir }
    }
}

/// One pretty-printed JSON file per user id
pub struct JsonFileStore {
    config: StoreConfig,
}

impl JsonFileStore {
    /// Create a file store, creating the storage directory if needed
    pub fn new(config: StoreConfig) -> Result<Self> {
        if !config.storage_dir.exists() {
            fs::create_dir_all(&config.storage_dir)?;
        }
        Ok(Self { config })
    }

    /// Create with the default home-directory configuration
    pub fn default_config() -> Result<Self> {
        Self::new(StoreConfig::default())
    }

    /// Storage directory in use
    pub fn storage_dir(&self) -> &PathBuf {
        &self.config.storage_dir
    }

    /// List user ids with a stored memory file
    pub fn list_users(&self) -> Result<Vec<String>> {
        if !self.config.storage_dir.exists() {
            return Ok(Vec::new());
        }

        let mut users = Vec::new();
        for entry in fs::read_dir(&self.config.storage_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
                if let Some(id) = filename
                    .strip_prefix("memory_")
                    .and_then(|rest| rest.strip_suffix(".json"))
                {
                    users.push(id.to_string());
                }
            }
        }
        users.sort();
        Ok(users)
    }

    fn path_for(&self, user_id: &str) -> Result<PathBuf> {
        // User ids become filenames; reject anything that could escape the
        // storage directory.
        if user_id.is_empty()
            || !user_id
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
        {
            return Err(CoachError::StorageError(format!(
                "invalid user id '{}'",
                user_id
            )));
        }
        Ok(self
            .config
            .storage_dir
            .join(format!("memory_{}.json", user_id)))
    }
}

impl MemoryStore for JsonFileStore {
    fn get(&self, user_id: &str) -> Result<Value> {
        let path = self.path_for(user_id)?;
        if !path.exists() {
            return Ok(Value::Object(Map::new()));
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn put(&self, user_id: &str, document: &Value) -> Result<()> {
        let path = self.path_for(user_id)?;
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&path, json)?;
        Ok(())
    }

    fn delete(&self, user_id: &str) -> Result<()> {
        let path = self.path_for(user_id)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// HashMap-backed store for tests and ephemeral sessions
#[derive(Default)]
pub struct InMemoryStore {
    documents: Mutex<HashMap<String, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryStore for InMemoryStore {
    fn get(&self, user_id: &str) -> Result<Value> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| CoachError::StorageError("store mutex poisoned".to_string()))?;
        Ok(documents
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())))
    }

    fn put(&self, user_id: &str, document: &Value) -> Result<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| CoachError::StorageError("store mutex poisoned".to_string()))?;
        documents.insert(user_id.to_string(), document.clone());
        Ok(())
    }

    fn delete(&self, user_id: &str) -> Result<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| CoachError::StorageError("store mutex poisoned".to_string()))?;
        documents.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (JsonFileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            storage_dir: temp_dir.path().to_path_buf(),
        };
        let store = JsonFileStore::new(config).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_store_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            storage_dir: temp_dir.path().join("nested").join("memory"),
        };
        let store = JsonFileStore::new(config).unwrap();
        assert!(store.storage_dir().exists());
    }

    #[test]
    fn test_get_missing_user_returns_empty_object() {
        let (store, _temp) = create_test_store();
        let value = store.get("nobody").unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_put_then_get() {
        let (store, _temp) = create_test_store();
        let doc = json!({"name": "Asha", "topic_mastery": {"linear_equations": 30}});

        store.put("student_001", &doc).unwrap();
        assert_eq!(store.get("student_001").unwrap(), doc);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (store, _temp) = create_test_store();
        store.put("student_001", &json!({"a": 1})).unwrap();

        store.delete("student_001").unwrap();
        assert_eq!(store.get("student_001").unwrap(), json!({}));

        // Deleting again is fine
        store.delete("student_001").unwrap();
    }

    #[test]
    fn test_list_users() {
        let (store, _temp) = create_test_store();
        store.put("alice", &json!({})).unwrap();
        store.put("bob", &json!({})).unwrap();

        assert_eq!(store.list_users().unwrap(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_rejects_path_traversal_user_id() {
        let (store, _temp) = create_test_store();
        assert!(store.get("../escape").is_err());
        assert!(store.put("a/b", &json!({})).is_err());
        assert!(store.delete("").is_err());
    }

    #[test]
    fn test_in_memory_store_round_trip() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("u").unwrap(), json!({}));

        store.put("u", &json!({"x": 1})).unwrap();
        assert_eq!(store.get("u").unwrap(), json!({"x": 1}));

        store.delete("u").unwrap();
        assert_eq!(store.get("u").unwrap(), json!({}));
    }
}
