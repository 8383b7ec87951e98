//! Modern strategy: typed binding

use serde::de::DeserializeOwned;
use tracing::trace;

use super::error::{ResolveError, ResolveResult};
use super::prefix::Prefix;
use super::strategy::{ResolveStrategy, Resolved};
use crate::binding::{BindError, Binder};
use crate::capability::Generation;
use crate::environment::Environment;

/// Binds a prefix into a caller-chosen type
#[derive(Debug, Clone, Copy, Default)]
pub struct ModernStrategy;

impl ModernStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ResolveStrategy for ModernStrategy {
    fn generation(&self) -> Generation {
        Generation::Modern
    }

    fn resolve<T: DeserializeOwned>(
        &self,
        env: &dyn Environment,
        prefix: &Prefix<'_>,
    ) -> ResolveResult<Resolved<T>> {
        let name = prefix.modern_form();
        let binder = Binder::get(env)
            .map_err(|e| ResolveError::resolution(Generation::Modern, prefix.as_str(), e))?;

        let bind_error = |source: BindError| ResolveError::Bind {
            prefix: prefix.as_str().to_string(),
            source,
        };
        let value = binder.bind::<T>(name).map_err(bind_error)?.get().map_err(bind_error)?;

        trace!(environment = env.name(), %name, "bound configuration");
        Ok(Resolved::Bound(value))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Deserialize;

    use super::*;
    use crate::environment::{EnvironmentError, EnvironmentResult, MemoryEnvironment};
    use crate::resolver::ResolutionCause;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Db {
        host: String,
        port: u16,
    }

    fn resolve<T: DeserializeOwned>(env: &dyn Environment, prefix: &str) -> ResolveResult<Resolved<T>> {
        ModernStrategy::new().resolve::<T>(env, &Prefix::new(prefix).unwrap())
    }

    #[test]
    fn test_with_or_without_trailing_separator() {
        let env = MemoryEnvironment::with_entries([("db.host", "localhost"), ("db.port", "5432")]);
        let expected = Db {
            host: "localhost".to_string(),
            port: 5432,
        };

        assert_eq!(resolve::<Db>(&env, "db").unwrap(), Resolved::Bound(expected));
        let again = resolve::<Db>(&env, "db.").unwrap().into_bound().unwrap();
        assert_eq!(again.port, 5432);
    }

    #[test]
    fn test_bind_into_map() {
        let env = MemoryEnvironment::with_entries([("p.a", "1"), ("p.b", "2")]);
        let resolved = resolve::<HashMap<String, String>>(&env, "p.").unwrap();
        let map = resolved.into_bound().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "1");
    }

    #[test]
    fn test_nothing_configured_is_bind_failure() {
        let env = MemoryEnvironment::with_entries([("db.host", "localhost")]);
        let err = resolve::<Db>(&env, "cache").unwrap_err();
        assert!(err.is_unbound());
        assert!(matches!(
            err,
            ResolveError::Bind {
                ref prefix,
                source: BindError::Unbound(_),
            } if prefix == "cache"
        ));
    }

    #[test]
    fn test_type_mismatch_is_bind_failure() {
        let env = MemoryEnvironment::with_entries([("db.host", "localhost"), ("db.port", "abc")]);
        let err = resolve::<Db>(&env, "db").unwrap_err();
        match err {
            ResolveError::Bind { source, .. } => assert_eq!(source.key(), Some("db.port")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_name_is_bind_failure() {
        let env = MemoryEnvironment::with_entries([("db.host", "localhost")]);
        let err = resolve::<Db>(&env, "db..").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Bind {
                source: BindError::InvalidName { .. },
                ..
            }
        ));
    }

    struct Unreadable;

    impl Environment for Unreadable {
        fn name(&self) -> &str {
            "unreadable"
        }

        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn entries(&self) -> EnvironmentResult<Vec<(String, String)>> {
            Err(EnvironmentError::NotAvailable("sealed".to_string()))
        }
    }

    #[test]
    fn test_environment_failure_is_resolution_failure() {
        let err = resolve::<Db>(&Unreadable, "db").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Resolution {
                generation: Generation::Modern,
                source: ResolutionCause::Environment(EnvironmentError::NotAvailable(_)),
                ..
            }
        ));
    }
}
