//! Key-value persistence for learner state
//!
//! Stores hold small JSON documents addressed by string keys. The app uses
//! [`FileStore`] (one `<key>.json` file in the data directory); tests use
//! [`MemoryStore`]. Consumers depend on the [`StateStore`] trait so the
//! backing medium is swappable.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A string-keyed store of JSON documents
pub trait StateStore {
    /// Fetch the raw value for a key, if present
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the value for a key, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Read and deserialize a stored document
///
/// A document that is missing, unreadable, or unparseable yields `None`;
/// corrupt state must never take the app down, only cost the saved data.
pub fn get_json<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read stored state '{}': {:#}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding malformed stored state '{}': {}", key, e);
            None
        }
    }
}

/// Serialize and write a document under a key
pub fn set_json<T: Serialize>(store: &dyn StateStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize state for '{}'", key))?;
    store.set(key, &raw)
}

/// File-backed store: each key is a `<key>.json` file under one directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read state from {:?}", path))?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory {:?}", parent))?;
        }

        fs::write(&path, value).with_context(|| format!("Failed to write state to {:?}", path))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);

        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove state at {:?}", path))?;
        }

        Ok(())
    }
}

/// In-memory store for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
