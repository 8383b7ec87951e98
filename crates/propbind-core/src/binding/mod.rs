//! Binding capabilities
//!
//! Two generations of capability, one per resolution strategy:
//! - `SubPropertyLookup` / `RelaxedPropertyResolver`: flat lookup of raw
//!   sub-properties (legacy)
//! - `Binder`: relaxed, typed binding into any `serde` deserializable type,
//!   extracted through figment from an `EnvironmentProvider` (modern)

mod sub_properties;
mod name;
mod provider;
mod binder;
mod error;

pub use sub_properties::{SubPropertyLookup, RelaxedPropertyResolver, relaxed_property_resolver};
pub use name::PropertyName;
pub use provider::EnvironmentProvider;
pub use binder::{Binder, BindResult};
pub use error::BindError;
