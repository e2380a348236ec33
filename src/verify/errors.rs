//! Verify-specific error types.

use thiserror::Error;

use crate::clients::HttpError;
use crate::error::ValidationError;

/// Error type for verification requests.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// A request field was set to an invalid value.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A payload had fields of the wrong JSON type.
    #[error("malformed verify payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The platform answered with a non-zero status.
    #[error("verify request failed with status {status}: {message}")]
    Api {
        /// The platform status code.
        status: String,
        /// The platform's `error_text`.
        message: String,
    },

    /// The client was used before a session was injected.
    #[error("verify client has no session; resolve it through a Client")]
    SessionNotConfigured,

    /// The request failed at the transport level or with a non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),
}
