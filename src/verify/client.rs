//! Client for the Verify API.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::auth::Session;
use crate::clients::{HttpMethod, HttpRequest};
use crate::registry::{Resource, SessionAware};

use super::errors::VerifyError;
use super::request::VerifyRequest;

const START_PATH: &str = "verify/json";

/// Result of a successfully started verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyStarted {
    /// Identifier used to check or cancel the verification.
    pub request_id: String,
}

#[derive(Debug, Deserialize)]
struct StartResponse {
    #[serde(default)]
    request_id: Option<String>,
    status: Value,
    #[serde(default)]
    error_text: Option<String>,
}

/// Starts verifications through the session's transport.
///
/// The platform reports failures inside a 200 response as a non-zero
/// `status`; these surface as [`VerifyError::Api`].
#[derive(Debug, Default)]
pub struct VerifyClient {
    session: Option<Arc<Session>>,
}

impl SessionAware for VerifyClient {
    fn set_session(&mut self, session: Arc<Session>) {
        self.session = Some(session);
    }
}

impl Resource for VerifyClient {
    fn session_aware(&mut self) -> Option<&mut dyn SessionAware> {
        Some(self)
    }
}

impl VerifyClient {
    /// Creates a client bound to `session`.
    #[must_use]
    pub const fn new(session: Arc<Session>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Sends `request` and returns the new verification's id.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::SessionNotConfigured`] without a session
    /// - [`VerifyError::Api`] when the platform reports a non-zero status
    /// - [`VerifyError::Http`] on transport failure
    pub async fn start(&self, request: &VerifyRequest) -> Result<VerifyStarted, VerifyError> {
        let session = self
            .session
            .as_deref()
            .ok_or(VerifyError::SessionNotConfigured)?;

        let mut body = serde_json::to_value(request)?;
        if let Value::Object(fields) = &mut body {
            let config = session.config();
            fields.insert("api_key".to_string(), config.api_key().as_ref().into());
            fields.insert("api_secret".to_string(), config.api_secret().as_ref().into());
        }

        let http_request = HttpRequest::json(HttpMethod::Post, START_PATH, body);
        let response = session.send(http_request).await?;

        let parsed = StartResponse::deserialize(&response.body)?;
        let status = status_code(&parsed.status);
        match (status.as_str(), parsed.request_id) {
            ("0", Some(request_id)) => {
                tracing::debug!(request_id = %request_id, "verification started");
                Ok(VerifyStarted { request_id })
            }
            _ => Err(VerifyError::Api {
                status,
                message: parsed.error_text.unwrap_or_default(),
            }),
        }
    }
}

fn status_code(status: &Value) -> String {
    match status {
        Value::String(status) => status.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_code_accepts_strings_and_numbers() {
        assert_eq!(status_code(&json!("0")), "0");
        assert_eq!(status_code(&json!(3)), "3");
    }

    #[tokio::test]
    async fn test_start_without_session_fails() {
        let client = VerifyClient::default();
        let request = VerifyRequest::new("14845551212", "Acme", 1).unwrap();

        let error = client.start(&request).await.unwrap_err();

        assert!(matches!(error, VerifyError::SessionNotConfigured));
    }
}
