/// Host capability traits for Animagery
use crate::error::Result;

/// Flat string key-value persistence
///
/// Abstracts the host's local storage (browser `localStorage`, a JSON file on
/// desktop, an in-memory map in tests). Operations are synchronous and
/// process-local; the last writer wins.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` (no-op when absent)
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
