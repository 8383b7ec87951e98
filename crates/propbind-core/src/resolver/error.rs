//! Resolution error taxonomy

use thiserror::Error;

use crate::binding::BindError;
use crate::capability::{CapabilityError, Generation, ProbeError};
use crate::environment::EnvironmentError;

/// Underlying cause of a resolution failure
#[derive(Error, Debug)]
pub enum ResolutionCause {
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

/// Errors returned by resolution calls
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Invalid prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: &'static str },

    /// Detection failed for a reason other than the capability being absent
    #[error("Binding capability probe failed: {0}")]
    Probe(#[from] ProbeError),

    /// The strategy's capability or the environment failed
    #[error("Failed to resolve {prefix:?} with the {generation} strategy: {source}")]
    Resolution {
        generation: Generation,
        prefix: String,
        #[source]
        source: ResolutionCause,
    },

    /// The binder ran but produced no value of the requested type
    #[error("Failed to bind {prefix:?}: {source}")]
    Bind {
        prefix: String,
        #[source]
        source: BindError,
    },

    #[error("The {generation} strategy cannot bind {prefix:?} into a typed structure")]
    UnsupportedShape { generation: Generation, prefix: String },
}

impl ResolveError {
    pub(crate) fn resolution(
        generation: Generation,
        prefix: &str,
        source: impl Into<ResolutionCause>,
    ) -> Self {
        ResolveError::Resolution {
            generation,
            prefix: prefix.to_string(),
            source: source.into(),
        }
    }

    /// Whether the error means nothing was configured under the prefix
    pub fn is_unbound(&self) -> bool {
        matches!(
            self,
            ResolveError::Bind {
                source: BindError::Unbound(_),
                ..
            }
        )
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
