//! Capability registry for discovering binding capabilities by identifier

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::binding::SubPropertyLookup;
use crate::environment::Environment;

/// Well-known identifier of the legacy sub-property capability
pub const RELAXED_PROPERTY_RESOLVER: &str = "relaxed-property-resolver";

/// Constructs a sub-property lookup scoped to an environment
pub type SubPropertyFactory = for<'a> fn(&'a dyn Environment) -> Box<dyn SubPropertyLookup + 'a>;

/// Errors that can occur while looking up a capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("Capability not registered: {0}")]
    Absent(String),

    #[error("Capability registry unavailable: {0}")]
    RegistryUnavailable(String),
}

pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Definition of a registered capability
#[derive(Clone)]
pub struct CapabilityDefinition {
    /// Unique identifier
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Constructor for the capability
    pub factory: SubPropertyFactory,
}

impl CapabilityDefinition {
    /// Construct the capability over an environment
    pub fn instantiate<'a>(&self, env: &'a dyn Environment) -> Box<dyn SubPropertyLookup + 'a> {
        (self.factory)(env)
    }
}

impl fmt::Debug for CapabilityDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Registry of the binding capabilities available to this process
///
/// The process-wide instance is returned by [`global_registry`]. Detection and
/// the legacy strategy both consult a registry, so tests and embedders can
/// supply their own instance.
#[derive(Default)]
pub struct CapabilityRegistry {
    capabilities: RwLock<HashMap<String, CapabilityDefinition>>,
}

impl CapabilityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the capabilities compiled into this build
    pub fn with_builtin() -> Self {
        #[allow(unused_mut)]
        let mut map: HashMap<String, CapabilityDefinition> = HashMap::new();

        #[cfg(feature = "legacy-binding")]
        map.insert(
            RELAXED_PROPERTY_RESOLVER.to_string(),
            CapabilityDefinition {
                name: RELAXED_PROPERTY_RESOLVER.to_string(),
                description: "Flat sub-property lookup by literal key prefix".to_string(),
                factory: crate::binding::relaxed_property_resolver,
            },
        );

        Self {
            capabilities: RwLock::new(map),
        }
    }

    /// Register a capability, replacing any previous definition
    pub fn register(
        &self,
        name: &str,
        description: &str,
        factory: SubPropertyFactory,
    ) -> CapabilityResult<()> {
        let mut capabilities = self
            .capabilities
            .write()
            .map_err(|e| CapabilityError::RegistryUnavailable(e.to_string()))?;
        capabilities.insert(
            name.to_string(),
            CapabilityDefinition {
                name: name.to_string(),
                description: description.to_string(),
                factory,
            },
        );
        Ok(())
    }

    /// Remove a capability, returning whether it was registered
    pub fn unregister(&self, name: &str) -> CapabilityResult<bool> {
        let mut capabilities = self
            .capabilities
            .write()
            .map_err(|e| CapabilityError::RegistryUnavailable(e.to_string()))?;
        Ok(capabilities.remove(name).is_some())
    }

    /// Resolve a capability by identifier
    ///
    /// Returns `CapabilityError::Absent` when nothing is registered under `name`.
    pub fn lookup(&self, name: &str) -> CapabilityResult<CapabilityDefinition> {
        let capabilities = self
            .capabilities
            .read()
            .map_err(|e| CapabilityError::RegistryUnavailable(e.to_string()))?;
        capabilities
            .get(name)
            .cloned()
            .ok_or_else(|| CapabilityError::Absent(name.to_string()))
    }

    /// List registered capabilities as (name, description) pairs, sorted by name
    pub fn list(&self) -> CapabilityResult<Vec<(String, String)>> {
        let capabilities = self
            .capabilities
            .read()
            .map_err(|e| CapabilityError::RegistryUnavailable(e.to_string()))?;
        let mut out: Vec<_> = capabilities
            .values()
            .map(|def| (def.name.clone(), def.description.clone()))
            .collect();
        out.sort();
        Ok(out)
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.list().map(|list| {
            list.into_iter().map(|(name, _)| name).collect::<Vec<_>>()
        });
        f.debug_struct("CapabilityRegistry")
            .field("capabilities", &names)
            .finish()
    }
}

#[cfg(test)]
impl CapabilityRegistry {
    /// Leave the registry lock poisoned
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = self.capabilities.write().unwrap();
                    panic!("poisoning capability registry");
                })
                .join();
        });
    }
}

/// Process-wide registry
static GLOBAL: Lazy<Arc<CapabilityRegistry>> =
    Lazy::new(|| Arc::new(CapabilityRegistry::with_builtin()));

/// Get the process-wide capability registry
pub fn global_registry() -> Arc<CapabilityRegistry> {
    Arc::clone(&GLOBAL)
}

/// Register a capability in the process-wide registry
///
/// Registration only influences detection if it happens before the
/// generation is first recorded.
///
/// # Example
///
/// ```
/// use propbind_core::binding::relaxed_property_resolver;
/// use propbind_core::capability::{register_capability, RELAXED_PROPERTY_RESOLVER};
///
/// register_capability(
///     RELAXED_PROPERTY_RESOLVER,
///     "Flat sub-property lookup",
///     relaxed_property_resolver,
/// )
/// .unwrap();
/// ```
pub fn register_capability(
    name: &str,
    description: &str,
    factory: SubPropertyFactory,
) -> CapabilityResult<()> {
    GLOBAL.register(name, description, factory)
}

/// List the capabilities in the process-wide registry
pub fn list_capabilities() -> CapabilityResult<Vec<(String, String)>> {
    GLOBAL.list()
}
