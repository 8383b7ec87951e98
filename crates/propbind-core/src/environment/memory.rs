//! In-memory environment

use parking_lot::RwLock;

use super::flatten::{flatten_json, flatten_yaml};
use super::traits::{Environment, EnvironmentResult};

/// In-memory environment for tests, embedding and pre-parsed documents
///
/// Entries keep their insertion order, which is the precedence order reported
/// by `entries()`. Setting an existing key replaces its value in place.
///
/// # Thread Safety
///
/// The environment uses `RwLock` internally and is safe to share between threads.
///
/// # Example
///
/// ```
/// use propbind_core::environment::{Environment, MemoryEnvironment};
///
/// let env = MemoryEnvironment::from_yaml_str("db:\n  host: localhost\n").unwrap();
/// assert_eq!(env.get("db.host"), Some("localhost".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    entries: RwLock<Vec<(String, String)>>,
}

impl MemoryEnvironment {
    /// Create a new empty environment
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Create an environment with initial entries
    ///
    /// Later duplicates of a key replace earlier ones.
    pub fn with_entries<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env = Self::new();
        for (key, value) in initial {
            env.set(key, value);
        }
        env
    }

    /// Parse a YAML document and flatten it into property keys
    pub fn from_yaml_str(document: &str) -> EnvironmentResult<Self> {
        Ok(Self::with_entries(flatten_yaml(document)?))
    }

    /// Parse a JSON document and flatten it into property keys
    pub fn from_json_str(document: &str) -> EnvironmentResult<Self> {
        Ok(Self::with_entries(flatten_json(document)?))
    }

    /// Set a value, replacing any existing value for the key
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.entries.write();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    /// Remove a key, returning its value if it was present
    pub fn remove(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.write();
        let pos = entries.iter().position(|(k, _)| k == key)?;
        Some(entries.remove(pos).1)
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the environment is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Environment for MemoryEnvironment {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn entries(&self) -> EnvironmentResult<Vec<(String, String)>> {
        Ok(self.entries.read().clone())
    }
}

impl Clone for MemoryEnvironment {
    fn clone(&self) -> Self {
        Self {
            entries: RwLock::new(self.entries.read().clone()),
        }
    }
}
