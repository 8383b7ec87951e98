//! propbind Core
//!
//! Prefix-scoped configuration resolution across two generations of binding
//! capability. A one-time probe records which generation is available; every
//! resolution then goes through the matching strategy:
//! - legacy: the raw sub-properties under `prefix.`
//! - modern: the entries under `prefix` bound into a `serde` type
//!
//! ```rust
//! use propbind_core::{Generation, MemoryEnvironment, PropertyResolver, Resolved};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Db {
//!     host: String,
//!     port: u16,
//! }
//!
//! let env = MemoryEnvironment::with_entries([("db.host", "localhost"), ("db.port", "5432")]);
//!
//! let resolver = PropertyResolver::new(Generation::Modern);
//! if let Resolved::Bound(db) = resolver.resolve::<Db>(&env, "db.").unwrap() {
//!     assert_eq!(db.port, 5432);
//! }
//! ```
//!
//! Hosts that want the process-wide decision call [`resolve`] instead. The
//! generation can be pinned with `PROPBIND_BINDING_GENERATION`.

pub mod environment;
pub mod capability;
pub mod binding;
pub mod resolver;

// Re-export commonly used types
pub use environment::{
    Environment, EnvironmentError, EnvironmentResult,
    MemoryEnvironment, OsEnvironment, ChainEnvironment,
};

pub use capability::{
    Generation, CapabilityRegistry, CapabilityError, ProbeError,
    register_capability, list_capabilities, generation,
};

pub use binding::{Binder, BindResult, BindError, EnvironmentProvider, SubPropertyLookup};

pub use resolver::{
    PropertyResolver, Resolved, ResolveError, ResolveResult, resolve,
};
