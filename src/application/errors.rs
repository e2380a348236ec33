//! Application-specific error types.

use thiserror::Error;

use crate::clients::HttpError;
use crate::error::ValidationError;

/// Error type for application entities and the applications API.
///
/// # Example
///
/// ```rust
/// use nexmo_api::application::{Application, ApplicationError};
/// use serde_json::json;
///
/// let mut application = Application::new();
/// let error = application.hydrate(&json!({"id": "abc"})).unwrap_err();
///
/// assert!(matches!(error, ApplicationError::MissingRequiredField { field: "name" }));
/// ```
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A payload lacked a field the entity cannot exist without.
    #[error("missing required field '{field}'")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A value object rejected its input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A payload had fields of the wrong JSON type.
    #[error("malformed application payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The client was used before a session was injected.
    #[error("application client has no session; resolve it through a Client")]
    SessionNotConfigured,

    /// The request failed at the transport level or with a non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// No application exists with the given id.
    #[error("application '{id}' not found")]
    NotFound {
        /// The id that was requested.
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field_or_id() {
        let missing = ApplicationError::MissingRequiredField { field: "name" };
        assert!(missing.to_string().contains("name"));

        let not_found = ApplicationError::NotFound {
            id: "aaaaaaaa-bbbb".to_string(),
        };
        assert!(not_found.to_string().contains("aaaaaaaa-bbbb"));
    }

    #[test]
    fn test_validation_error_converts() {
        let error: ApplicationError = ValidationError::invalid("address", "empty").into();
        assert!(matches!(error, ApplicationError::Validation(_)));
        assert!(error.to_string().contains("address"));
    }
}
