//! Error types for the Nexmo API SDK.
//!
//! This module contains error types shared across the SDK for configuration
//! and input validation.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Value objects with constrained fields (webhooks,
//! verification requests) return [`ValidationError`] at the point of
//! assignment, never at serialization time.
//!
//! # Example
//!
//! ```rust
//! use nexmo_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Nexmo API key.")]
    EmptyApiKey,

    /// API secret cannot be empty.
    #[error("API secret cannot be empty. Please provide a valid Nexmo API secret.")]
    EmptyApiSecret,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.nexmo.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

/// Error raised when a value object rejects an assignment.
///
/// The `field` names the offending property so the caller can point at the
/// exact input that was wrong.
///
/// # Example
///
/// ```rust
/// use nexmo_api::ValidationError;
///
/// let error = ValidationError::InvalidField {
///     field: "country",
///     reason: "Country must be in two character format".to_string(),
/// };
/// assert!(error.to_string().contains("country"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field was given a value outside its allowed format or range.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField {
        /// The name of the rejected field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ValidationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the name of the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidField { field, .. } => field,
        }
    }
}
