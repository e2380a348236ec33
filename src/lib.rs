//! # Nexmo API Rust SDK
//!
//! A Rust SDK for the Nexmo communications platform API, providing type-safe
//! configuration, a lazily-built set of API clients, and typed models for
//! platform resources.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`NexmoConfig`] and [`NexmoConfigBuilder`]
//! - Validated newtypes for API credentials and host URLs
//! - A [`Client`] whose API clients are built on first use and shared
//! - A [`registry::ResourceRegistry`] for resolving API clients by name
//! - The [`application::Application`] model with lazy capability hydration
//! - Validated [`verify::VerifyRequest`] parameters
//! - Async HTTP transport with basic authorization and retry handling
//!
//! ## Quick Start
//!
//! ```rust
//! use nexmo_api::{ApiKey, ApiSecret, Client, NexmoConfig};
//!
//! let config = NexmoConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_secret(ApiSecret::new("your-api-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = Client::new(config);
//! let applications = client.applications().unwrap();
//! ```
//!
//! ## Applications
//!
//! ```rust,ignore
//! use nexmo_api::application::{Application, MessagesEvent};
//!
//! let mut application = client.applications()?.get("78d335fa-323d-0114-9c3d-d6f0d48968cf").await?;
//! application
//!     .messages_config_mut()
//!     .set_webhook_url(MessagesEvent::Inbound, "https://example.com/inbound", "POST")?;
//!
//! let updated = client.applications()?.update(&application).await?;
//! ```
//!
//! ## Registering Additional Clients
//!
//! ```rust
//! use nexmo_api::{ApiKey, ApiSecret, Client, NexmoConfig};
//! use nexmo_api::registry::{Factory, Resource};
//!
//! #[derive(Default)]
//! struct Insight;
//! impl Resource for Insight {}
//!
//! let config = NexmoConfig::builder()
//!     .api_key(ApiKey::new("key").unwrap())
//!     .api_secret(ApiSecret::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//! let client = Client::new(config);
//!
//! client.registry().set("insight", Factory::of::<Insight>());
//! assert!(client.registry().get_as::<Insight>("insight").is_ok());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and value objects validate on assignment
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Built once**: Each API client is constructed at most once per [`Client`]

pub mod application;
pub mod auth;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod registry;
pub mod verify;

// Re-export public types at crate root for convenience
pub use auth::Session;
pub use client::Client;
pub use config::{ApiKey, ApiSecret, HostUrl, NexmoConfig, NexmoConfigBuilder};
pub use error::{ConfigError, ValidationError};

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};

// Re-export the resource models most callers need
pub use application::{Application, ApplicationError};
pub use registry::{RegistryError, ResourceRegistry};
pub use verify::{VerifyError, VerifyRequest};
