use std::error::Error as StdError;

use crate::{BoxError, Key};

/// Failures reported by registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No binding exists for the key.
    #[error("dependency not found: {key}")]
    NotFound { key: Key },

    /// The bound factory failed. Never cached for singletons.
    #[error(transparent)]
    Factory(BoxError),

    /// Typed resolution found a value of another type.
    #[error("type mismatch for {key}: expected {expected}")]
    TypeMismatch { key: Key, expected: &'static str },

    /// A factory asked for a positional argument that is missing or ill-typed.
    #[error("argument {index} is missing or is not a {expected}")]
    Argument { index: usize, expected: &'static str },
}

impl RegistryError {
    /// Returns `true` for [`RegistryError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }

    pub fn is_factory(&self) -> bool {
        matches!(self, RegistryError::Factory(_))
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, RegistryError::TypeMismatch { .. })
    }

    /// The key a `NotFound` or `TypeMismatch` error refers to.
    pub fn key(&self) -> Option<&Key> {
        match self {
            RegistryError::NotFound { key } | RegistryError::TypeMismatch { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The error a factory failed with, exactly as it returned it.
    pub fn factory_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            RegistryError::Factory(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Takes ownership of the factory error.
    pub fn into_factory_error(self) -> Result<BoxError, Self> {
        match self {
            RegistryError::Factory(err) => Ok(err),
            other => Err(other),
        }
    }
}
