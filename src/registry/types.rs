//! Resource and factory types for the registry.
//!
//! A registry entry is a [`Factory`]: one of a small set of construction
//! strategies resolved through a single dispatch in
//! [`ResourceRegistry::get`](super::ResourceRegistry::get). Resolved values
//! implement [`Resource`]; those that need the shared [`Session`] opt in by
//! implementing [`SessionAware`] and returning themselves from
//! [`Resource::session_aware`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::auth::Session;

use super::errors::RegistryError;
use super::ResourceRegistry;

/// Type-erasure helper so resolved instances can be downcast again.
///
/// Implemented for every `Any + Send + Sync` type; never implement it by hand.
pub trait AsAny: Any + Send + Sync {
    /// Borrows `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Converts a shared handle into an `Arc<dyn Any>` for downcasting.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A value the registry can build, cache, and hand out.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use nexmo_api::Session;
/// use nexmo_api::registry::{Resource, SessionAware};
///
/// #[derive(Default)]
/// struct NumbersClient {
///     session: Option<Arc<Session>>,
/// }
///
/// impl SessionAware for NumbersClient {
///     fn set_session(&mut self, session: Arc<Session>) {
///         self.session = Some(session);
///     }
/// }
///
/// impl Resource for NumbersClient {
///     fn session_aware(&mut self) -> Option<&mut dyn SessionAware> {
///         Some(self)
///     }
/// }
/// ```
pub trait Resource: AsAny {
    /// Returns the session-injection hook if this resource wants the session.
    ///
    /// The default declines injection.
    fn session_aware(&mut self) -> Option<&mut dyn SessionAware> {
        None
    }
}

/// Capability for resources that talk to the API through the shared session.
pub trait SessionAware {
    /// Receives the session right after construction, before caching.
    fn set_session(&mut self, session: Arc<Session>);
}

/// A construction step that needs the registry to finish building.
///
/// Returned from a zero-argument constructor as [`Constructed::Deferred`]; the
/// registry immediately invokes it with itself so it can resolve dependencies.
pub trait ResourceFactory: Send {
    /// Builds the real resource.
    ///
    /// # Errors
    ///
    /// Returns whatever error resolving a dependency produced, or
    /// [`RegistryError::Construction`] for its own failures.
    fn create(self: Box<Self>, registry: &ResourceRegistry)
        -> Result<Box<dyn Resource>, RegistryError>;
}

/// Output of a zero-argument constructor.
pub enum Constructed {
    /// The constructor produced the resource itself.
    Ready(Box<dyn Resource>),
    /// The constructor produced an invokable factory.
    Deferred(Box<dyn ResourceFactory>),
}

/// Closure form of a factory: receives the registry for dependency lookups.
pub type BuildFn =
    dyn Fn(&ResourceRegistry) -> Result<Box<dyn Resource>, RegistryError> + Send + Sync;

/// How the registry obtains the instance for a key.
#[derive(Clone)]
pub enum Factory {
    /// A callable taking the registry itself as its argument.
    Callable(Arc<BuildFn>),
    /// A zero-argument constructor.
    Constructor(fn() -> Constructed),
    /// A pre-built instance, cached as-is without session injection.
    Instance(Arc<dyn Resource>),
}

impl Factory {
    /// Wraps a closure that builds the resource with access to the registry.
    #[must_use]
    pub fn callable<F>(build: F) -> Self
    where
        F: Fn(&ResourceRegistry) -> Result<Box<dyn Resource>, RegistryError>
            + Send
            + Sync
            + 'static,
    {
        Self::Callable(Arc::new(build))
    }

    /// Builds `T` through its `Default` implementation.
    #[must_use]
    pub fn of<T: Resource + Default>() -> Self {
        Self::Constructor(construct_ready::<T>)
    }

    /// Builds the factory `F` through `Default`, then invokes it with the registry.
    #[must_use]
    pub fn deferred<F: ResourceFactory + Default + 'static>() -> Self {
        Self::Constructor(construct_deferred::<F>)
    }

    /// Registers an already-built value.
    #[must_use]
    pub fn instance<T: Resource>(value: T) -> Self {
        Self::Instance(Arc::new(value))
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Callable(_) => "callable",
            Self::Constructor(_) => "constructor",
            Self::Instance(_) => "instance",
        }
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Factory::{}", self.kind())
    }
}

fn construct_ready<T: Resource + Default>() -> Constructed {
    Constructed::Ready(Box::new(T::default()))
}

fn construct_deferred<F: ResourceFactory + Default + 'static>() -> Constructed {
    Constructed::Deferred(Box::new(F::default()))
}

/// Minimal keyed-lookup interface for dependency injection.
///
/// Lets callers depend on "something that resolves resources by name"
/// without naming [`ResourceRegistry`].
pub trait ResourceContainer {
    /// Returns `true` if an entry exists for `key`.
    fn has(&self, key: &str) -> bool;

    /// Resolves the entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownResource`] when no entry exists.
    fn get(&self, key: &str) -> Result<Arc<dyn Resource>, RegistryError>;
}
