//! Generation-aware resolution of configuration namespaces
//!
//! The resolver hands a prefix to one of two strategies:
//! - legacy: flat sub-properties, prefix normalized to end with `.`
//! - modern: typed binding, prefix normalized to drop one trailing `.`

mod error;
mod prefix;
mod strategy;
mod legacy;
mod modern;
mod property_resolver;

pub use error::{ResolveError, ResolveResult, ResolutionCause};
pub use prefix::Prefix;
pub use strategy::{ResolveStrategy, Resolved};
pub use legacy::LegacyStrategy;
pub use modern::ModernStrategy;
pub use property_resolver::{PropertyResolver, resolve};
