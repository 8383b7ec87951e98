//! Process environment variable source

use std::env;

use super::traits::{Environment, EnvironmentError, EnvironmentResult, SEPARATOR};

/// Environment backed by the process environment variables
///
/// Variable names map to property keys the way layered config loaders read
/// them: a double underscore separates elements and the name is lowercased,
/// so `DB__MAX_SIZE` is visible as `db.max_size` and `SERVERS__0__PORT` as
/// `servers.0.port`. A single underscore stays inside its element. With a
/// variable prefix only the variables carrying it are visible, and the prefix
/// is stripped first.
///
/// This environment is read-only and reads the live process environment on
/// every call.
///
/// # Example
///
/// ```
/// use propbind_core::environment::{Environment, OsEnvironment};
///
/// let env = OsEnvironment::with_prefix("MYAPP_");
/// // MYAPP_DB__HOST=localhost is exposed as "db.host"
/// assert_eq!(env.variable_name("db.host"), "MYAPP_DB__HOST");
/// let _host = env.get("db.host");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OsEnvironment {
    var_prefix: Option<String>,
}

/// Separator between key elements in a variable name
const NESTING: &str = "__";

impl OsEnvironment {
    /// Expose every process environment variable
    pub fn new() -> Self {
        Self { var_prefix: None }
    }

    /// Expose only the variables whose name starts with `var_prefix`
    pub fn with_prefix(var_prefix: impl Into<String>) -> Self {
        Self {
            var_prefix: Some(var_prefix.into()),
        }
    }

    /// The variable prefix, if any
    pub fn var_prefix(&self) -> Option<&str> {
        self.var_prefix.as_deref()
    }

    /// Map a property key to the variable name that carries it
    ///
    /// Inverse of [`property_key`](Self::property_key) for every key it yields.
    /// Indexed elements (`servers[0]`) become their own element and `-` reads
    /// as `_`.
    pub fn variable_name(&self, key: &str) -> String {
        let mut name = self.var_prefix.clone().unwrap_or_default();
        for c in key.chars() {
            match c {
                '.' | '[' => name.push_str(NESTING),
                ']' => {}
                '-' => name.push('_'),
                c => name.extend(c.to_uppercase()),
            }
        }
        name
    }

    /// Map a variable name to its property key, if the variable is visible
    pub fn property_key(&self, var: &str) -> Option<String> {
        let rest = match &self.var_prefix {
            Some(prefix) => var.strip_prefix(prefix.as_str())?,
            None => var,
        };
        let elements: Vec<String> = rest.split(NESTING).map(str::to_lowercase).collect();
        if elements.iter().any(String::is_empty) {
            return None;
        }
        Some(elements.join(&SEPARATOR.to_string()))
    }
}

impl Environment for OsEnvironment {
    fn name(&self) -> &str {
        "os"
    }

    fn get(&self, key: &str) -> Option<String> {
        env::var(self.variable_name(key)).ok()
    }

    fn entries(&self) -> EnvironmentResult<Vec<(String, String)>> {
        let mut out: Vec<(String, String)> = Vec::new();
        for (name, value) in env::vars_os() {
            let Some(name) = name.to_str() else {
                // Undecodable names cannot carry a visible key.
                continue;
            };
            let Some(key) = self.property_key(name) else {
                continue;
            };
            let value = value.into_string().map_err(|_| EnvironmentError::InvalidEntry {
                key: key.clone(),
                reason: format!("value of {name} is not valid UTF-8"),
            })?;
            if !out.iter().any(|(k, _)| *k == key) {
                out.push((key, value));
            }
        }
        // Variable order is platform defined; sort for stable precedence.
        out.sort();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_environment_name() {
        assert_eq!(OsEnvironment::new().name(), "os");
    }

    #[test]
    fn test_variable_name_mapping() {
        let env = OsEnvironment::with_prefix("APP_");
        assert_eq!(env.variable_name("db.host"), "APP_DB__HOST");
        assert_eq!(env.variable_name("db.max_size"), "APP_DB__MAX_SIZE");
        assert_eq!(env.variable_name("db.max-size"), "APP_DB__MAX_SIZE");
        assert_eq!(env.variable_name("servers[0].port"), "APP_SERVERS__0__PORT");
    }

    #[test]
    fn test_property_key_mapping() {
        let env = OsEnvironment::with_prefix("APP_");
        assert_eq!(env.property_key("APP_DB__HOST"), Some("db.host".to_string()));
        assert_eq!(env.property_key("APP_DB__MAX_SIZE"), Some("db.max_size".to_string()));
        assert_eq!(env.property_key("APP_LOG_LEVEL"), Some("log_level".to_string()));
        assert_eq!(env.property_key("OTHER_DB__HOST"), None);
        assert_eq!(env.property_key("APP_"), None);
        assert_eq!(env.property_key("APP_DB__"), None);

        let all = OsEnvironment::new();
        assert_eq!(all.property_key("SERVERS__0__PORT"), Some("servers.0.port".to_string()));
    }

    #[test]
    fn test_variable_name_inverts_property_key() {
        let env = OsEnvironment::with_prefix("APP_");
        for var in ["APP_DB__HOST", "APP_DB__MAX_SIZE", "APP_LOG_LEVEL", "APP_SERVERS__0__PORT"] {
            let key = env.property_key(var).unwrap();
            assert_eq!(env.variable_name(&key), var);
        }
    }

    #[test]
    fn test_os_environment_get_and_entries() {
        temp_env::with_vars(
            [
                ("PBTEST_OS_DB__HOST", Some("localhost")),
                ("PBTEST_OS_DB__MAX_SIZE", Some("10")),
            ],
            || {
                let env = OsEnvironment::with_prefix("PBTEST_OS_");
                assert_eq!(env.get("db.host"), Some("localhost".to_string()));

                let entries = env.entries().unwrap();
                assert_eq!(
                    entries,
                    vec![
                        ("db.host".to_string(), "localhost".to_string()),
                        ("db.max_size".to_string(), "10".to_string()),
                    ]
                );

                // Every enumerated key reads back through get
                for (key, value) in entries {
                    assert_eq!(env.get(&key), Some(value));
                }
            },
        );
    }

    #[test]
    fn test_bind_max_size_from_variables() {
        #[derive(Debug, serde::Deserialize)]
        struct Pool {
            host: String,
            max_size: u32,
        }

        temp_env::with_vars(
            [
                ("PBTEST_BIND_DB__HOST", Some("db.internal")),
                ("PBTEST_BIND_DB__MAX_SIZE", Some("10")),
            ],
            || {
                let env = OsEnvironment::with_prefix("PBTEST_BIND_");
                let pool: Pool = crate::binding::Binder::get(&env)
                    .unwrap()
                    .bind("db")
                    .unwrap()
                    .get()
                    .unwrap();
                assert_eq!(pool.host, "db.internal");
                assert_eq!(pool.max_size, 10);
            },
        );
    }

    #[test]
    fn test_os_environment_missing() {
        let env = OsEnvironment::with_prefix("PBTEST_NOTHING_HERE_");
        assert_eq!(env.get("db.host"), None);
        assert!(env.entries().unwrap().is_empty());
    }
}
