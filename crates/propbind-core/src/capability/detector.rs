//! One-time detection of the binding capability generation
//!
//! Detection consults the capability registry for the legacy sub-property
//! capability. Its presence selects [`Generation::Legacy`]; its absence selects
//! [`Generation::Modern`]. The `PROPBIND_BINDING_GENERATION` variable can pin
//! the outcome at startup.
//!
//! [`generation`] records the first detection outcome for the rest of the
//! process, including a failed one.

use std::env;

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::debug;

use super::generation::Generation;
use super::registry::{global_registry, CapabilityError, CapabilityRegistry, RELAXED_PROPERTY_RESOLVER};

/// Environment variable that pins the detected generation
pub const GENERATION_ENV_VAR: &str = "PROPBIND_BINDING_GENERATION";

/// Unexpected failures while probing for the legacy capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Invalid {var} value {value:?}: expected \"legacy\" or \"modern\"")]
    InvalidOverride { var: &'static str, value: String },

    #[error("Capability probe failed: {0}")]
    Registry(#[source] CapabilityError),
}

/// Startup settings that influence detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Skip the registry probe and use this generation
    pub generation_override: Option<Generation>,
}

impl ProbeSettings {
    /// Read settings from the process environment
    ///
    /// An unset or empty `PROPBIND_BINDING_GENERATION` means no override. Any
    /// other value that is not a generation name is an error.
    pub fn from_env() -> Result<Self, ProbeError> {
        let raw = match env::var(GENERATION_ENV_VAR) {
            Ok(raw) => raw,
            Err(env::VarError::NotPresent) => return Ok(Self::default()),
            Err(env::VarError::NotUnicode(raw)) => {
                return Err(ProbeError::InvalidOverride {
                    var: GENERATION_ENV_VAR,
                    value: raw.to_string_lossy().into_owned(),
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let generation: Generation = raw.parse().map_err(|_| ProbeError::InvalidOverride {
            var: GENERATION_ENV_VAR,
            value: raw.clone(),
        })?;
        Ok(Self {
            generation_override: Some(generation),
        })
    }
}

/// Probe the process-wide registry, honoring `PROPBIND_BINDING_GENERATION`
///
/// Every call probes afresh; use [`generation`] for the recorded outcome.
pub fn detect() -> Result<Generation, ProbeError> {
    let settings = ProbeSettings::from_env()?;
    detect_with(&global_registry(), &settings)
}

/// Probe a specific registry
pub fn detect_with(
    registry: &CapabilityRegistry,
    settings: &ProbeSettings,
) -> Result<Generation, ProbeError> {
    if let Some(generation) = settings.generation_override {
        debug!(%generation, "binding generation pinned by {}", GENERATION_ENV_VAR);
        return Ok(generation);
    }

    let generation = match registry.lookup(RELAXED_PROPERTY_RESOLVER) {
        Ok(_) => Generation::Legacy,
        Err(CapabilityError::Absent(_)) => Generation::Modern,
        Err(e) => return Err(ProbeError::Registry(e)),
    };
    debug!(%generation, "detected binding generation");
    Ok(generation)
}

static DETECTED: OnceCell<Result<Generation, ProbeError>> = OnceCell::new();

/// The generation recorded for this process
///
/// The first call runs [`detect`]; every later call, from any thread, observes
/// the same outcome. A failed probe is recorded too and is not retried.
pub fn generation() -> Result<Generation, ProbeError> {
    DETECTED.get_or_init(detect).clone()
}
