//! Typed binding of environment entries

use figment::Figment;
use serde::de::DeserializeOwned;
use tracing::trace;

use super::error::BindError;
use super::name::PropertyName;
use super::provider::EnvironmentProvider;
use crate::environment::{Environment, EnvironmentResult};

/// Binds environment entries into typed values
///
/// A binder takes a snapshot of the environment when it is obtained; later
/// changes to the environment are not visible through it. Names and keys are
/// compared in canonical snake_case form, so `db.max-size`, `db.maxSize` and
/// `DB.MAX_SIZE` all bind the field `max_size` beneath `db`. Values are kept
/// as strings and converted to numbers or booleans when the target asks.
///
/// # Example
///
/// ```
/// use propbind_core::binding::Binder;
/// use propbind_core::environment::MemoryEnvironment;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Db {
///     host: String,
///     port: u16,
/// }
///
/// let env = MemoryEnvironment::with_entries([("db.host", "localhost"), ("db.port", "5432")]);
/// let db: Db = Binder::get(&env).unwrap().bind("db").unwrap().get().unwrap();
/// assert_eq!(db.port, 5432);
/// ```
#[derive(Debug, Clone)]
pub struct Binder {
    provider: EnvironmentProvider,
}

impl Binder {
    /// Obtain a binder over an environment
    ///
    /// Fails only if the environment cannot enumerate its entries. Keys that
    /// are not valid property names are skipped.
    pub fn get(env: &dyn Environment) -> EnvironmentResult<Self> {
        Ok(Self {
            provider: EnvironmentProvider::new(env)?,
        })
    }

    /// Bind everything beneath `name` into a `T`
    ///
    /// Returns an unbound result when nothing is configured at `name`, and an
    /// error when `name` is malformed or the entries cannot form a `T`.
    pub fn bind<T: DeserializeOwned>(&self, name: &str) -> Result<BindResult<T>, BindError> {
        let name = PropertyName::parse(name)?;
        let Some(scoped) = self.provider.scoped(name.elements()) else {
            trace!(%name, "no properties to bind");
            return Ok(BindResult::unbound(name.as_str()));
        };

        let figment = Figment::from(scoped);
        let extracted = if name.is_root() {
            figment.extract_lossy::<T>()
        } else {
            figment.extract_inner_lossy::<T>(&name.path())
        };
        let value = extracted.map_err(|e| mismatch(&name, e))?;
        Ok(BindResult::bound(name.as_str(), value))
    }

    /// Number of values in the snapshot
    pub fn len(&self) -> usize {
        self.provider.len()
    }

    pub fn is_empty(&self) -> bool {
        self.provider.is_empty()
    }
}

/// Report a failed extraction against the full canonical key
fn mismatch(name: &PropertyName, error: figment::Error) -> BindError {
    let key = if error.path.starts_with(name.elements()) {
        error.path.join(".")
    } else {
        let mut key = name.elements().to_vec();
        key.extend(error.path.iter().cloned());
        key.join(".")
    };
    BindError::mismatch(key, error.kind.to_string())
}

/// Outcome of a bind: a value, or nothing when no entries matched
#[derive(Debug, Clone, PartialEq)]
pub struct BindResult<T> {
    name: String,
    value: Option<T>,
}

impl<T> BindResult<T> {
    fn bound(name: &str, value: T) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value),
        }
    }

    fn unbound(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
        }
    }

    /// The name that was bound
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }

    /// Unwrap the bound value, failing with `BindError::Unbound` when empty
    pub fn get(self) -> Result<T, BindError> {
        self.value.ok_or(BindError::Unbound(self.name))
    }

    pub fn into_option(self) -> Option<T> {
        self.value
    }

    /// The bound value, or `default` when nothing matched
    pub fn or_else(self, default: impl FnOnce() -> T) -> T {
        self.value.unwrap_or_else(default)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BindResult<U> {
        BindResult {
            name: self.name,
            value: self.value.map(f),
        }
    }
}
