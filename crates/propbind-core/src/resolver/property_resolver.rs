//! Generation-aware resolver
//!
//! A `PropertyResolver` picks its strategy once, at construction, and never
//! changes it. The free [`resolve`] function builds one from the generation
//! recorded for the process, so every caller observes the same strategy.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{ResolveError, ResolveResult};
use super::legacy::LegacyStrategy;
use super::modern::ModernStrategy;
use super::prefix::Prefix;
use super::strategy::{ResolveStrategy, Resolved};
use crate::capability::{self, global_registry, CapabilityRegistry, Generation};
use crate::environment::Environment;

#[derive(Debug, Clone)]
enum Strategy {
    Legacy(LegacyStrategy),
    Modern(ModernStrategy),
}

/// Resolves configuration namespaces with a fixed strategy
#[derive(Debug, Clone)]
pub struct PropertyResolver {
    strategy: Strategy,
}

impl PropertyResolver {
    /// Resolver for `generation`, using the process-wide capability registry
    pub fn new(generation: Generation) -> Self {
        Self::with_registry(generation, global_registry())
    }

    /// Resolver for `generation` over a specific registry
    ///
    /// The registry is only consulted by the legacy strategy.
    pub fn with_registry(generation: Generation, registry: Arc<CapabilityRegistry>) -> Self {
        let strategy = match generation {
            Generation::Legacy => Strategy::Legacy(LegacyStrategy::new(registry)),
            Generation::Modern => Strategy::Modern(ModernStrategy::new()),
        };
        Self { strategy }
    }

    /// Resolver for the generation recorded for this process
    pub fn detected() -> ResolveResult<Self> {
        let generation = capability::generation()?;
        debug!(%generation, "using recorded binding generation");
        Ok(Self::new(generation))
    }

    pub fn generation(&self) -> Generation {
        match &self.strategy {
            Strategy::Legacy(s) => s.generation(),
            Strategy::Modern(s) => s.generation(),
        }
    }

    /// Resolve everything configured under `prefix`
    ///
    /// The legacy strategy ignores `T` and returns
    /// [`Resolved::SubProperties`]; the modern strategy returns
    /// [`Resolved::Bound`].
    pub fn resolve<T: DeserializeOwned>(
        &self,
        env: &dyn Environment,
        prefix: &str,
    ) -> ResolveResult<Resolved<T>> {
        let prefix = Prefix::new(prefix)?;
        match &self.strategy {
            Strategy::Legacy(s) => s.resolve(env, &prefix),
            Strategy::Modern(s) => s.resolve(env, &prefix),
        }
    }

    /// Resolve without a target type
    ///
    /// On the modern path the entries bind into a `serde_json::Value` tree of
    /// strings.
    pub fn resolve_untyped(
        &self,
        env: &dyn Environment,
        prefix: &str,
    ) -> ResolveResult<Resolved<serde_json::Value>> {
        self.resolve(env, prefix)
    }

    /// Bind `prefix` into a `T`, refusing the untyped legacy shape
    ///
    /// A generation without typed binding fails before the environment is
    /// read.
    pub fn bind<T: DeserializeOwned>(&self, env: &dyn Environment, prefix: &str) -> ResolveResult<T> {
        let generation = self.generation();
        let unsupported = || ResolveError::UnsupportedShape {
            generation,
            prefix: prefix.to_string(),
        };
        Prefix::new(prefix)?;
        if !generation.supports_typed_binding() {
            return Err(unsupported());
        }
        match self.resolve(env, prefix)? {
            Resolved::Bound(value) => Ok(value),
            Resolved::SubProperties(_) => Err(unsupported()),
        }
    }
}

/// Resolve `prefix` with the generation recorded for this process
///
/// Detection runs on first use. A failed detection is returned as
/// [`ResolveError::Probe`] on this and every later call.
pub fn resolve<T: DeserializeOwned>(
    env: &dyn Environment,
    prefix: &str,
) -> ResolveResult<Resolved<T>> {
    PropertyResolver::detected()?.resolve(env, prefix)
}
