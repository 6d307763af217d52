//! Key-value persistence capability.
//!
//! Completion records and preferences only need string keys and string
//! values with last-write-wins semantics. Anything that can do that can
//! back the app: the SQLite database in `pc-db`, or [`MemoryStore`].

use std::collections::BTreeMap;
use std::convert::Infallible;

pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Removes `key`. Returns whether a value was present.
    fn delete(&mut self, key: &str) -> Result<bool, Self::Error>;
}

/// A store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, Self::Error> {
        Ok(self.entries.remove(key).is_some())
    }
}
