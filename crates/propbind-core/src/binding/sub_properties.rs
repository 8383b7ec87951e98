//! Legacy sub-property lookup

use std::collections::BTreeMap;

use crate::environment::{Environment, EnvironmentResult};

/// Flat lookup of every entry beneath a key prefix
///
/// This is the only capability the legacy generation offers: no typed binding,
/// just relative keys mapped to raw string values.
pub trait SubPropertyLookup {
    /// All entries whose key literally starts with `prefix`, keyed by the remainder
    fn sub_properties(&self, prefix: &str) -> EnvironmentResult<BTreeMap<String, String>>;
}

/// Sub-property lookup over a borrowed environment
///
/// Matching is literal and case-sensitive. The caller supplies the prefix in
/// its final form, trailing separator included. When several entries map to
/// the same relative key the first one enumerated wins.
///
/// # Example
///
/// ```
/// use propbind_core::binding::{RelaxedPropertyResolver, SubPropertyLookup};
/// use propbind_core::environment::MemoryEnvironment;
///
/// let env = MemoryEnvironment::with_entries([("db.host", "localhost"), ("db.port", "5432")]);
/// let props = RelaxedPropertyResolver::new(&env).sub_properties("db.").unwrap();
/// assert_eq!(props["port"], "5432");
/// ```
pub struct RelaxedPropertyResolver<'a> {
    env: &'a dyn Environment,
}

impl<'a> RelaxedPropertyResolver<'a> {
    pub fn new(env: &'a dyn Environment) -> Self {
        Self { env }
    }
}

impl SubPropertyLookup for RelaxedPropertyResolver<'_> {
    fn sub_properties(&self, prefix: &str) -> EnvironmentResult<BTreeMap<String, String>> {
        let mut props = BTreeMap::new();
        for (key, value) in self.env.entries_with_prefix(prefix)? {
            // Environments may override the prefix scan loosely.
            let Some(relative) = key.strip_prefix(prefix) else {
                continue;
            };
            // The prefix itself is not a sub-property.
            if relative.is_empty() {
                continue;
            }
            props.entry(relative.to_string()).or_insert(value);
        }
        Ok(props)
    }
}

/// Factory registered under [`RELAXED_PROPERTY_RESOLVER`](crate::capability::RELAXED_PROPERTY_RESOLVER)
pub fn relaxed_property_resolver<'a>(env: &'a dyn Environment) -> Box<dyn SubPropertyLookup + 'a> {
    Box::new(RelaxedPropertyResolver::new(env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryEnvironment;

    #[test]
    fn test_sub_properties_strip_prefix() {
        let env = MemoryEnvironment::with_entries([
            ("db.host", "localhost"),
            ("db.pool.max", "10"),
            ("dbx.host", "elsewhere"),
            ("cache.ttl", "60"),
        ]);

        let props = RelaxedPropertyResolver::new(&env).sub_properties("db.").unwrap();
        let expected: BTreeMap<String, String> = [
            ("host".to_string(), "localhost".to_string()),
            ("pool.max".to_string(), "10".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(props, expected);
    }

    #[test]
    fn test_sub_properties_case_sensitive() {
        let env = MemoryEnvironment::with_entries([("DB.host", "localhost")]);
        let props = RelaxedPropertyResolver::new(&env).sub_properties("db.").unwrap();
        assert!(props.is_empty());
    }

    #[test]
    fn test_sub_properties_skip_exact_prefix_key() {
        let env = MemoryEnvironment::with_entries([("db.", "odd"), ("db.host", "localhost")]);
        let props = RelaxedPropertyResolver::new(&env).sub_properties("db.").unwrap();
        assert_eq!(props.len(), 1);
    }

    /// Prefix scan that ignores the prefix it is given
    struct Loose(Vec<(String, String)>);

    impl Environment for Loose {
        fn name(&self) -> &str {
            "loose"
        }

        fn get(&self, key: &str) -> Option<String> {
            self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        }

        fn entries(&self) -> EnvironmentResult<Vec<(String, String)>> {
            Ok(self.0.clone())
        }

        fn entries_with_prefix(&self, _prefix: &str) -> EnvironmentResult<Vec<(String, String)>> {
            self.entries()
        }
    }

    #[test]
    fn test_sub_properties_skip_keys_outside_prefix() {
        let env = Loose(vec![
            ("é".to_string(), "short multibyte".to_string()),
            ("x".to_string(), "short".to_string()),
            ("caché.ttl".to_string(), "60".to_string()),
            ("db.host".to_string(), "localhost".to_string()),
        ]);
        let props = RelaxedPropertyResolver::new(&env).sub_properties("db.").unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props["host"], "localhost");
    }

    #[test]
    fn test_factory_builds_lookup() {
        let env = MemoryEnvironment::with_entries([("a.b", "1")]);
        let lookup = relaxed_property_resolver(&env);
        assert_eq!(lookup.sub_properties("a.").unwrap()["b"], "1");
    }
}
