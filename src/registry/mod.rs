//! Lazy, cached lookup of API resource clients by name.
//!
//! The [`ResourceRegistry`] maps short keys such as `"applications"` or
//! `"verify"` to a [`Factory`] and builds each resource the first time it is
//! requested. Built resources are cached and shared; resources implementing
//! [`SessionAware`] receive the registry's [`Session`](crate::Session) before
//! they are cached.
//!
//! # Factory kinds
//!
//! - [`Factory::callable`]: a closure receiving the registry, for resources
//!   that depend on other keys
//! - [`Factory::of`]: a zero-argument constructor through `Default`
//! - [`Factory::deferred`]: a constructor yielding a [`ResourceFactory`]
//!   that is then invoked with the registry
//! - [`Factory::instance`]: a pre-built value, returned as-is
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use nexmo_api::{ApiKey, ApiSecret, NexmoConfig, Session};
//! use nexmo_api::registry::{Factory, RegistryError, Resource, ResourceRegistry};
//!
//! #[derive(Default)]
//! struct Pricing;
//! impl Resource for Pricing {}
//!
//! let config = NexmoConfig::builder()
//!     .api_key(ApiKey::new("key").unwrap())
//!     .api_secret(ApiSecret::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//! let registry = ResourceRegistry::new(Arc::new(Session::new(config)));
//!
//! registry.set("pricing", Factory::of::<Pricing>());
//! assert!(registry.has("pricing"));
//! assert!(registry.get("pricing").is_ok());
//!
//! let missing = registry.get("nonexistent").err().unwrap();
//! assert!(matches!(missing, RegistryError::UnknownResource { .. }));
//! ```

mod errors;
mod resource_registry;
mod types;

pub use errors::RegistryError;
pub use resource_registry::ResourceRegistry;
pub use types::{
    AsAny, BuildFn, Constructed, Factory, Resource, ResourceContainer, ResourceFactory,
    SessionAware,
};
