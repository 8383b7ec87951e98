//! Binder error type

use thiserror::Error;

/// Errors produced by the modern binder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("Invalid property name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("No configuration properties found under {0:?}")]
    Unbound(String),

    #[error("Failed to bind {key:?}: {message}")]
    Mismatch { key: String, message: String },
}

impl BindError {
    pub(crate) fn mismatch(key: impl Into<String>, message: impl Into<String>) -> Self {
        BindError::Mismatch {
            key: key.into(),
            message: message.into(),
        }
    }

    /// The full key the error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            BindError::Mismatch { key, .. } => Some(key),
            BindError::Unbound(name) | BindError::InvalidName { name, .. } => Some(name),
        }
    }
}
