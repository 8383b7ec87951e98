//! Legacy strategy: flat sub-properties

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::trace;

use super::error::{ResolveError, ResolveResult};
use super::prefix::Prefix;
use super::strategy::{ResolveStrategy, Resolved};
use crate::capability::{CapabilityRegistry, Generation, RELAXED_PROPERTY_RESOLVER};
use crate::environment::Environment;

/// Resolves a prefix to its raw sub-properties
///
/// The sub-property capability is looked up in the registry on every call, so
/// a capability that disappears after detection surfaces as a resolution
/// failure rather than a change of generation.
#[derive(Debug, Clone)]
pub struct LegacyStrategy {
    registry: Arc<CapabilityRegistry>,
}

impl LegacyStrategy {
    pub fn new(registry: Arc<CapabilityRegistry>) -> Self {
        Self { registry }
    }
}

impl ResolveStrategy for LegacyStrategy {
    fn generation(&self) -> Generation {
        Generation::Legacy
    }

    fn resolve<T: DeserializeOwned>(
        &self,
        env: &dyn Environment,
        prefix: &Prefix<'_>,
    ) -> ResolveResult<Resolved<T>> {
        let normalized = prefix.legacy_form();
        let capability = self
            .registry
            .lookup(RELAXED_PROPERTY_RESOLVER)
            .map_err(|e| ResolveError::resolution(Generation::Legacy, prefix.as_str(), e))?;

        let props = capability
            .instantiate(env)
            .sub_properties(&normalized)
            .map_err(|e| ResolveError::resolution(Generation::Legacy, prefix.as_str(), e))?;

        trace!(
            environment = env.name(),
            prefix = %normalized,
            count = props.len(),
            "resolved sub-properties"
        );
        Ok(Resolved::SubProperties(props))
    }
}
