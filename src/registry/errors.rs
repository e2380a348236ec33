//! Registry-specific error types.

use thiserror::Error;

/// Error type for resource resolution.
///
/// None of these errors are transient: they point at a programming or
/// wiring mistake and are surfaced to the caller without retry.
///
/// # Example
///
/// ```rust
/// use nexmo_api::registry::RegistryError;
///
/// let error = RegistryError::UnknownResource {
///     key: "nonexistent".to_string(),
/// };
/// assert_eq!(error.to_string(), "no map defined for `nonexistent`");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No factory is registered under the requested key.
    #[error("no map defined for `{key}`")]
    UnknownResource {
        /// The key that was requested.
        key: String,
    },

    /// The resolved instance is not of the requested concrete type.
    #[error("resource `{key}` is not a `{expected}`")]
    TypeMismatch {
        /// The key that was requested.
        key: String,
        /// The type name the caller asked for.
        expected: &'static str,
    },

    /// A factory asked for its own key while it was being built.
    #[error("circular dependency while resolving `{key}`")]
    CircularDependency {
        /// The key whose construction re-entered itself.
        key: String,
    },

    /// A factory reported a failure while building its instance.
    #[error("failed to construct `{key}`: {message}")]
    Construction {
        /// The key being built.
        key: String,
        /// What went wrong.
        message: String,
    },
}

impl RegistryError {
    /// Returns the key the error refers to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownResource { key }
            | Self::TypeMismatch { key, .. }
            | Self::CircularDependency { key }
            | Self::Construction { key, .. } => key,
        }
    }
}
