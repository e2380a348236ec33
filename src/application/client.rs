//! Client for the `/v2/applications` API.

use std::sync::Arc;

use crate::auth::Session;
use crate::clients::{HttpError, HttpMethod, HttpRequest};
use crate::registry::{Resource, SessionAware};

use super::entity::Application;
use super::errors::ApplicationError;

const APPLICATIONS_PATH: &str = "v2/applications";

/// Creates, fetches, updates, and deletes applications.
///
/// Resolve it from a [`Client`](crate::Client), which injects the session:
///
/// ```rust,no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use nexmo_api::{ApiKey, ApiSecret, Client, NexmoConfig};
/// use nexmo_api::application::{Application, VoiceEvent};
///
/// let config = NexmoConfig::builder()
///     .api_key(ApiKey::new("key")?)
///     .api_secret(ApiSecret::new("secret")?)
///     .build()?;
/// let client = Client::new(config);
///
/// let mut application = Application::new();
/// application.set_name("My Application");
/// application
///     .voice_config_mut()
///     .set_webhook_url(VoiceEvent::Answer, "https://example.com/answer", "GET")?;
///
/// let created = client.applications()?.create(&application).await?;
/// println!("created {created}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ApplicationClient {
    session: Option<Arc<Session>>,
}

impl SessionAware for ApplicationClient {
    fn set_session(&mut self, session: Arc<Session>) {
        self.session = Some(session);
    }
}

impl Resource for ApplicationClient {
    fn session_aware(&mut self) -> Option<&mut dyn SessionAware> {
        Some(self)
    }
}

impl ApplicationClient {
    /// Creates a client bound to `session`.
    #[must_use]
    pub const fn new(session: Arc<Session>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Fetches one application.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] on a 404, and the usual
    /// transport and hydration errors otherwise.
    pub async fn get(&self, id: &str) -> Result<Application, ApplicationError> {
        let request = HttpRequest::builder(HttpMethod::Get, format!("{APPLICATIONS_PATH}/{id}"))
            .build()
            .map_err(HttpError::from)?;
        let response = self
            .session()?
            .send(request)
            .await
            .map_err(|error| not_found(error, id))?;

        Application::from_response(response.body)
    }

    /// Creates an application and returns it as the platform stored it,
    /// including the generated id and private key.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Http`] if the platform rejects the request.
    pub async fn create(&self, application: &Application) -> Result<Application, ApplicationError> {
        let body = serde_json::to_value(application.to_payload())?;
        let request = HttpRequest::json(HttpMethod::Post, APPLICATIONS_PATH, body);
        let response = self.session()?.send(request).await?;

        let created = Application::from_response(response.body)?;
        tracing::debug!(id = created.id(), "application created");
        Ok(created)
    }

    /// Replaces an existing application's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingRequiredField`] if `application`
    /// has no id, and [`ApplicationError::NotFound`] on a 404.
    pub async fn update(&self, application: &Application) -> Result<Application, ApplicationError> {
        let session = self.session()?;
        let id = application
            .id()
            .ok_or(ApplicationError::MissingRequiredField { field: "id" })?;
        let body = serde_json::to_value(application.to_payload())?;
        let request =
            HttpRequest::json(HttpMethod::Put, format!("{APPLICATIONS_PATH}/{id}"), body);
        let response = session
            .send(request)
            .await
            .map_err(|error| not_found(error, id))?;

        Application::from_response(response.body)
    }

    /// Deletes an application.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] on a 404.
    pub async fn delete(&self, id: &str) -> Result<(), ApplicationError> {
        let request =
            HttpRequest::builder(HttpMethod::Delete, format!("{APPLICATIONS_PATH}/{id}"))
                .build()
                .map_err(HttpError::from)?;
        self.session()?
            .send(request)
            .await
            .map_err(|error| not_found(error, id))?;

        tracing::debug!(id, "application deleted");
        Ok(())
    }

    /// Lists the first page of applications on the account.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Http`] on transport failure and
    /// [`ApplicationError::MissingRequiredField`] if a listed entry lacks a
    /// name.
    pub async fn list(&self) -> Result<Vec<Application>, ApplicationError> {
        let request = HttpRequest::builder(HttpMethod::Get, APPLICATIONS_PATH)
            .build()
            .map_err(HttpError::from)?;
        let response = self.session()?.send(request).await?;

        let entries = response
            .body
            .get("_embedded")
            .and_then(|embedded| embedded.get("applications"))
            .and_then(serde_json::Value::as_array)
            .cloned()
            .unwrap_or_default();

        entries.into_iter().map(Application::from_response).collect()
    }

    fn session(&self) -> Result<&Session, ApplicationError> {
        self.session
            .as_deref()
            .ok_or(ApplicationError::SessionNotConfigured)
    }
}

fn not_found(error: HttpError, id: &str) -> ApplicationError {
    match error {
        HttpError::Response(response) if response.code == 404 => ApplicationError::NotFound {
            id: id.to_string(),
        },
        other => ApplicationError::Http(other),
    }
}
