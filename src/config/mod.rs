//! Configuration types for the Nexmo API SDK.
//!
//! This module provides the configuration used to initialize a [`Client`](crate::Client).
//!
//! # Overview
//!
//! - [`NexmoConfig`]: The main configuration struct holding all SDK settings
//! - [`NexmoConfigBuilder`]: A builder for constructing [`NexmoConfig`] instances
//! - [`ApiKey`]: A validated API key newtype
//! - [`ApiSecret`]: A validated API secret newtype with masked debug output
//! - [`HostUrl`]: A validated base URL for the platform API
//!
//! # Example
//!
//! ```rust
//! use nexmo_api::{NexmoConfig, ApiKey, ApiSecret};
//!
//! let config = NexmoConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .api_secret(ApiSecret::new("my-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_host().as_ref(), "https://api.nexmo.com");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ApiSecret, HostUrl};

use crate::error::ConfigError;

/// Configuration for the Nexmo API SDK.
///
/// Holds the account credentials, the API host, and transport defaults.
///
/// # Thread Safety
///
/// `NexmoConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct NexmoConfig {
    api_key: ApiKey,
    api_secret: ApiSecret,
    api_host: HostUrl,
    user_agent_prefix: Option<String>,
    tries: u32,
}

impl NexmoConfig {
    /// Creates a new builder for constructing a `NexmoConfig`.
    #[must_use]
    pub fn builder() -> NexmoConfigBuilder {
        NexmoConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API secret.
    #[must_use]
    pub const fn api_secret(&self) -> &ApiSecret {
        &self.api_secret
    }

    /// Returns the API host all requests are sent to.
    #[must_use]
    pub const fn api_host(&self) -> &HostUrl {
        &self.api_host
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times a request is attempted before giving up.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

// Verify NexmoConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NexmoConfig>();
};

/// Builder for constructing [`NexmoConfig`] instances.
///
/// Required fields are `api_key` and `api_secret`.
///
/// # Defaults
///
/// - `api_host`: `https://api.nexmo.com`
/// - `user_agent_prefix`: `None`
/// - `tries`: `1` (no automatic retries)
#[derive(Debug, Default)]
pub struct NexmoConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret: Option<ApiSecret>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
}

impl NexmoConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API secret (required).
    #[must_use]
    pub fn api_secret(mut self, secret: ApiSecret) -> Self {
        self.api_secret = Some(secret);
        self
    }

    /// Overrides the API host, e.g. to point at a regional endpoint or a mock server.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets how many times a request is attempted on 429 and 500 responses.
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`NexmoConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `api_secret` are not set.
    pub fn build(self) -> Result<NexmoConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_secret = self
            .api_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "api_secret",
            })?;

        Ok(NexmoConfig {
            api_key,
            api_secret,
            api_host: self.api_host.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            tries: self.tries.unwrap_or(1).max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = NexmoConfigBuilder::new()
            .api_secret(ApiSecret::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_requires_api_secret() {
        let result = NexmoConfigBuilder::new()
            .api_key(ApiKey::new("key").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "api_secret"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = NexmoConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_host().as_ref(), HostUrl::DEFAULT);
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.tries(), 1);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = NexmoConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .api_host(HostUrl::new("http://localhost:9000").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .tries(3)
            .build()
            .unwrap();

        assert_eq!(config.api_host().as_ref(), "http://localhost:9000");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.tries(), 3);
    }

    #[test]
    fn test_zero_tries_is_clamped() {
        let config = NexmoConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .tries(0)
            .build()
            .unwrap();

        assert_eq!(config.tries(), 1);
    }

    #[test]
    fn test_config_debug_masks_secret() {
        let config = NexmoConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret(ApiSecret::new("hunter2").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("NexmoConfig"));
        assert!(!debug_str.contains("hunter2"));
    }
}
