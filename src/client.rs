//! Entry point tying configuration, session, and resource clients together.

use std::sync::Arc;

use crate::application::ApplicationClient;
use crate::auth::Session;
use crate::config::NexmoConfig;
use crate::registry::{Factory, RegistryError, ResourceRegistry};
use crate::verify::VerifyClient;

/// Registry key of the applications API client.
pub const APPLICATIONS: &str = "applications";
/// Registry key of the Verify API client.
pub const VERIFY: &str = "verify";

/// The SDK entry point.
///
/// Owns one [`Session`] and a [`ResourceRegistry`] seeded with the built-in
/// API clients. Each client is built on first use and shared afterwards.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use nexmo_api::{ApiKey, ApiSecret, Client, NexmoConfig};
///
/// let config = NexmoConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret(ApiSecret::new("secret").unwrap())
///     .build()
///     .unwrap();
/// let client = Client::new(config);
///
/// let first = client.applications().unwrap();
/// let second = client.applications().unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert!(client.registry().has("verify"));
/// ```
#[derive(Debug)]
pub struct Client {
    session: Arc<Session>,
    registry: ResourceRegistry,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client for the given configuration.
    #[must_use]
    pub fn new(config: NexmoConfig) -> Self {
        let session = Arc::new(Session::new(config));
        let registry = ResourceRegistry::with_factories(
            [
                (APPLICATIONS, Factory::of::<ApplicationClient>()),
                (VERIFY, Factory::of::<VerifyClient>()),
            ],
            Arc::clone(&session),
        );
        Self { session, registry }
    }

    /// Returns the shared session.
    #[must_use]
    pub const fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Returns the resource registry, for registering or resolving
    /// additional clients.
    #[must_use]
    pub const fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Returns the applications API client.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TypeMismatch`] if the `"applications"` entry
    /// was replaced with a different type.
    pub fn applications(&self) -> Result<Arc<ApplicationClient>, RegistryError> {
        self.registry.get_as(APPLICATIONS)
    }

    /// Returns the Verify API client.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TypeMismatch`] if the `"verify"` entry was
    /// replaced with a different type.
    pub fn verify(&self) -> Result<Arc<VerifyClient>, RegistryError> {
        self.registry.get_as(VERIFY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ApiSecret};

    fn config() -> NexmoConfig {
        NexmoConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_seeds_builtin_clients() {
        let client = Client::new(config());
        let mut keys = client.registry().keys();
        keys.sort();
        assert_eq!(keys, vec!["applications", "verify"]);
    }

    #[test]
    fn test_clients_are_built_lazily() {
        let client = Client::new(config());
        assert!(!client.registry().is_cached(VERIFY));

        client.verify().unwrap();

        assert!(client.registry().is_cached(VERIFY));
        assert!(!client.registry().is_cached(APPLICATIONS));
    }
}
