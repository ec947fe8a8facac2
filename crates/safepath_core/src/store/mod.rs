//! Persistent key-value storage for session state and settings.
//!
//! Values are plain strings; callers that store structured data encode
//! it as JSON.

pub mod memory;
pub mod paths;
pub mod sqlite;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

pub fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => {
            let v = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid JSON stored under key '{key}': {raw}"))?;
            Ok(Some(v))
        }
    }
}

pub fn set_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to encode value for key '{key}'"))?;
    store.set(key, &raw)
}
