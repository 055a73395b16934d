//! Per-user memory persistence
//!
//! The store is an explicit repository dependency with get/put/delete over an
//! opaque, versionless JSON value keyed by user id. Writes are unconditional
//! overwrites (last writer wins); there is no locking and no versioning, so
//! callers needing multi-writer safety must serialize access externally.

pub mod store;

pub use store::{InMemoryStore, JsonFileStore, MemoryStore, StoreConfig};

use serde_json::Value;

use crate::errors::Result;
use crate::types::UserMemory;

/// Load a user's memory document, defaulting every field for a missing or
/// partial document.
pub fn load_user(store: &dyn MemoryStore, user_id: &str) -> Result<UserMemory> {
    let value = store.get(user_id)?;
    Ok(serde_json::from_value(value)?)
}

/// Save a user's memory document (full-document overwrite).
pub fn save_user(store: &dyn MemoryStore, user_id: &str, memory: &UserMemory) -> Result<()> {
    let value: Value = serde_json::to_value(memory)?;
    store.put(user_id, &value)
}
