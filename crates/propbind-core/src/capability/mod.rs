//! Binding capability discovery
//!
//! - `Generation`: which binding capability generation is available
//! - `CapabilityRegistry`: capabilities registered by well-known identifier
//! - `detect`/`generation`: the one-time probe that selects a generation

mod generation;
mod registry;
mod detector;

pub use generation::{Generation, ParseGenerationError};
pub use registry::{
    CapabilityRegistry, CapabilityDefinition, CapabilityError, CapabilityResult,
    SubPropertyFactory, RELAXED_PROPERTY_RESOLVER,
    global_registry, register_capability, list_capabilities,
};
pub use detector::{detect, detect_with, generation, ProbeError, ProbeSettings, GENERATION_ENV_VAR};
