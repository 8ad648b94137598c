use super::KeyValueStore;
use crate::error::{NotewiseError, Result};
use std::collections::HashMap;

/// In-memory key-value store for testing.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
    failing_prefix: Option<String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `put` on a key starting with `prefix` fail.
    /// Used to exercise half-written saves.
    pub fn fail_writes_with_prefix(&mut self, prefix: impl Into<String>) {
        self.failing_prefix = Some(prefix.into());
    }

    pub fn clear_write_failures(&mut self) {
        self.failing_prefix = None;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(prefix) = &self.failing_prefix {
            if key.starts_with(prefix.as_str()) {
                return Err(NotewiseError::Store(format!(
                    "Simulated write failure for {}",
                    key
                )));
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}
