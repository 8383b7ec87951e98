//! Binding capability generation

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which binding capability generation the process uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    /// Only the generic sub-property lookup is available
    Legacy,
    /// Direct typed binding is available
    Modern,
}

impl Generation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Generation::Legacy => "legacy",
            Generation::Modern => "modern",
        }
    }

    /// Whether this generation can bind typed structures
    pub fn supports_typed_binding(&self) -> bool {
        matches!(self, Generation::Modern)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown binding generation {0:?} (expected \"legacy\" or \"modern\")")]
pub struct ParseGenerationError(pub String);

impl FromStr for Generation {
    type Err = ParseGenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "v1" | "1" => Ok(Generation::Legacy),
            "modern" | "v2" | "2" => Ok(Generation::Modern),
            _ => Err(ParseGenerationError(s.to_string())),
        }
    }
}
