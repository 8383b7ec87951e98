//! Configuration environment abstractions and implementations
//!
//! This module provides the key/value collaborator every resolution call reads:
//! - `Environment` trait for implementing custom sources
//! - Built-in implementations: `MemoryEnvironment`, `OsEnvironment`, `ChainEnvironment`

mod traits;
mod memory;
mod os;
mod chain;
mod flatten;

pub use traits::{Environment, EnvironmentError, EnvironmentResult, SEPARATOR};
pub use memory::MemoryEnvironment;
pub use os::OsEnvironment;
pub use chain::ChainEnvironment;
