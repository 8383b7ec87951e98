//! Layered environment with first-wins precedence

use std::collections::HashSet;
use std::sync::Arc;

use super::traits::{Environment, EnvironmentResult};

/// An environment that layers several environments in precedence order
///
/// Exact lookups return the value from the first environment that has the key.
/// Enumeration yields each key once, taking the value from the first
/// environment that provides it.
///
/// # Example
///
/// ```
/// use propbind_core::environment::{Environment, ChainEnvironment, MemoryEnvironment};
/// use std::sync::Arc;
///
/// let overrides = Arc::new(MemoryEnvironment::with_entries([("db.port", "6543")]));
/// let defaults = Arc::new(MemoryEnvironment::with_entries([("db.port", "5432")]));
///
/// let chain = ChainEnvironment::new(vec![overrides, defaults]);
/// assert_eq!(chain.get("db.port"), Some("6543".to_string()));
/// ```
pub struct ChainEnvironment {
    sources: Vec<Arc<dyn Environment>>,
}

impl ChainEnvironment {
    /// Create a chain, highest precedence first
    pub fn new(sources: Vec<Arc<dyn Environment>>) -> Self {
        Self { sources }
    }

    /// Append a source with lower precedence than the existing ones
    pub fn push(&mut self, source: Arc<dyn Environment>) {
        self.sources.push(source);
    }

    /// Get the sources in this chain
    pub fn sources(&self) -> &[Arc<dyn Environment>] {
        &self.sources
    }

    /// Find which source provides a key
    pub fn find_source(&self, key: &str) -> Option<&Arc<dyn Environment>> {
        self.sources.iter().find(|source| source.contains(key))
    }
}

impl Environment for ChainEnvironment {
    fn name(&self) -> &str {
        "chain"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }

    fn entries(&self) -> EnvironmentResult<Vec<(String, String)>> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for source in &self.sources {
            for (key, value) in source.entries()? {
                if seen.insert(key.clone()) {
                    out.push((key, value));
                }
            }
        }
        Ok(out)
    }
}
