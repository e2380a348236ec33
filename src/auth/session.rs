//! Authenticated session shared by resource clients.
//!
//! This module provides the [`Session`] type: the account configuration plus
//! the transport that signs every request with it.

use crate::clients::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::config::NexmoConfig;

/// Shared transport state for one account.
///
/// A `Session` is created once per [`Client`](crate::Client) and handed to
/// every resource that opts into session injection. Resources hold it behind
/// an `Arc`, so all of them send requests through the same connection pool.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`, making it safe to share across threads.
///
/// # Example
///
/// ```rust
/// use nexmo_api::{NexmoConfig, ApiKey, ApiSecret, Session};
///
/// let config = NexmoConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret(ApiSecret::new("secret").unwrap())
///     .build()
///     .unwrap();
///
/// let session = Session::new(config);
/// assert_eq!(session.config().api_key().as_ref(), "key");
/// ```
#[derive(Debug)]
pub struct Session {
    config: NexmoConfig,
    http_client: HttpClient,
}

impl Session {
    /// Creates a new session for the given configuration.
    #[must_use]
    pub fn new(config: NexmoConfig) -> Self {
        let http_client = HttpClient::new(&config);
        Self {
            config,
            http_client,
        }
    }

    /// Returns the configuration this session was created with.
    #[must_use]
    pub const fn config(&self) -> &NexmoConfig {
        &self.config
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a request through the session's transport.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for invalid requests, network failures, and
    /// non-2xx responses.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.http_client.request(request).await
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ApiSecret, HostUrl};

    #[test]
    fn test_session_builds_transport_from_config() {
        let config = NexmoConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .api_host(HostUrl::new("http://localhost:3000").unwrap())
            .tries(2)
            .build()
            .unwrap();

        let session = Session::new(config);

        assert_eq!(session.http_client().base_uri(), "http://localhost:3000");
        assert_eq!(session.http_client().default_tries(), 2);
        assert_eq!(session.config().api_secret().as_ref(), "secret");
    }
}
