//! Key-value store backends
//!
//! Both backends hold plain strings. [`MemoryStore`] lives only as long as
//! the process; [`JsonFileStore`] mirrors the whole map into a single JSON
//! object on disk after every write, so a restart sees exactly what the
//! last writer left.

use crate::error::StorageError;
use animagery_core::KeyValueStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Process-local in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> animagery_core::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> animagery_core::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> animagery_core::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object in a file
///
/// The file is rewritten through a sibling temp file and a rename, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`
    ///
    /// A missing file is an empty store; it is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> crate::Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    StorageError::corrupt(path.display().to_string(), e.to_string())
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened key-value file");

        Ok(Self { path, entries })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk; the caller commits them only on success
    fn flush(&self, entries: &BTreeMap<String, String>) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> animagery_core::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> animagery_core::Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> animagery_core::Result<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }

        let mut next = self.entries.clone();
        next.remove(key);
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }
}
