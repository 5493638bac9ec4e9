// ABOUTME: Key-value storage used to persist the last viewed slide
// ABOUTME: Provides an in-memory store and a JSON file store with localStorage semantics

use crate::errors::{DeckError, Result};
use crate::utils;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Key under which the slide index is saved
pub const DEFAULT_STORAGE_KEY: &str = "currentSlide";

/// Durable string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file, e.g. `{"currentSlide": "2"}`.
///
/// A missing, unreadable or malformed file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        if !self.path.exists() {
            debug!("State file {:?} does not exist yet", self.path);
            return BTreeMap::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read state file {:?}: {}", self.path, e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring malformed state file {:?}: {}", self.path, e);
                BTreeMap::new()
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());

        utils::ensure_parent_directory_exists(&self.path)?;
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json).map_err(|e| {
            DeckError::StoreError(format!("Failed to write {:?}: {}", self.path, e))
        })
    }
}
