//! Core trait and error types for configuration environments

use thiserror::Error;

/// Separator between the elements of a property key (`db.host`)
pub const SEPARATOR: char = '.';

/// Errors that can occur while reading an environment
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Environment not available: {0}")]
    NotAvailable(String),

    #[error("Invalid entry {key}: {reason}")]
    InvalidEntry { key: String, reason: String },

    #[error("Document error: {0}")]
    Document(#[from] figment::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Environment error: {0}")]
    Other(String),
}

pub type EnvironmentResult<T> = Result<T, EnvironmentError>;

/// A source of configuration entries
///
/// Keys are `.`-separated property names (`db.host`, `servers[0].port`),
/// values are plain strings. The environment is owned by the caller; resolvers
/// only borrow it for the duration of a call.
///
/// Implementations:
/// - In-memory (`MemoryEnvironment`)
/// - Process environment variables (`OsEnvironment`)
/// - Layered sources with first-wins precedence (`ChainEnvironment`)
///
/// # Example
///
/// ```
/// use propbind_core::environment::{Environment, MemoryEnvironment};
///
/// let env = MemoryEnvironment::new();
/// env.set("db.host", "localhost");
/// assert_eq!(env.get("db.host"), Some("localhost".to_string()));
/// ```
pub trait Environment: Send + Sync {
    /// Human-readable name of this environment
    fn name(&self) -> &str;

    /// Look up a value by its exact key
    fn get(&self, key: &str) -> Option<String>;

    /// Enumerate every entry, highest precedence first
    ///
    /// Each key appears at most once.
    fn entries(&self) -> EnvironmentResult<Vec<(String, String)>>;

    /// Enumerate the entries whose key literally starts with `prefix`
    fn entries_with_prefix(&self, prefix: &str) -> EnvironmentResult<Vec<(String, String)>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .collect())
    }

    /// Check if a key is present
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<(String, String)>);

    impl Environment for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn get(&self, key: &str) -> Option<String> {
            self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        }

        fn entries(&self) -> EnvironmentResult<Vec<(String, String)>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_entries_with_prefix_is_literal() {
        let env = Fixed(vec![
            ("db.host".to_string(), "localhost".to_string()),
            ("dbx.host".to_string(), "other".to_string()),
            ("DB.port".to_string(), "5432".to_string()),
        ]);

        let matched = env.entries_with_prefix("db.").unwrap();
        assert_eq!(matched, vec![("db.host".to_string(), "localhost".to_string())]);
    }

    #[test]
    fn test_contains() {
        let env = Fixed(vec![("a".to_string(), String::new())]);
        assert!(env.contains("a"));
        assert!(!env.contains("b"));
    }
}
