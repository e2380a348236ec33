//! The lazy, caching resource registry.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::{Mutex, RwLock};

use crate::auth::Session;

use super::errors::RegistryError;
use super::types::{AsAny, Constructed, Factory, Resource, ResourceContainer};

/// Lazily builds and caches named resources.
///
/// Each key maps to a [`Factory`]. The first [`get`](Self::get) for a key
/// runs its factory, injects the session into resources that opt in through
/// [`SessionAware`](super::SessionAware), and caches the result; every later
/// `get` returns the same shared instance.
///
/// # Thread Safety
///
/// `ResourceRegistry` is `Send + Sync`. Building a key holds that key's
/// build lock and nothing else, so factories may resolve other keys. When
/// several threads ask for an unbuilt key at once, one runs the factory and
/// the others wait for its instance.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use nexmo_api::{ApiKey, ApiSecret, NexmoConfig, Session};
/// use nexmo_api::registry::{Factory, Resource, ResourceRegistry};
///
/// #[derive(Default)]
/// struct Numbers;
/// impl Resource for Numbers {}
///
/// let config = NexmoConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret(ApiSecret::new("secret").unwrap())
///     .build()
///     .unwrap();
///
/// let registry = ResourceRegistry::with_factories(
///     [("numbers", Factory::of::<Numbers>())],
///     Arc::new(Session::new(config)),
/// );
///
/// let first = registry.get_as::<Numbers>("numbers").unwrap();
/// let second = registry.get_as::<Numbers>("numbers").unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct ResourceRegistry {
    factories: RwLock<HashMap<String, Factory>>,
    cache: RwLock<HashMap<String, Arc<dyn Resource>>>,
    building: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    resolving: Mutex<HashSet<(ThreadId, String)>>,
    session: Arc<Session>,
}

// Verify ResourceRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceRegistry>();
};

impl ResourceRegistry {
    /// Creates an empty registry bound to `session`.
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
            cache: RwLock::new(HashMap::new()),
            building: Mutex::new(HashMap::new()),
            resolving: Mutex::new(HashSet::new()),
            session,
        }
    }

    /// Creates a registry seeded with the given key/factory pairs.
    #[must_use]
    pub fn with_factories<I, K>(factories: I, session: Arc<Session>) -> Self
    where
        I: IntoIterator<Item = (K, Factory)>,
        K: Into<String>,
    {
        let registry = Self::new(session);
        {
            let mut map = registry.factories.write();
            for (key, factory) in factories {
                map.insert(key.into(), factory);
            }
        }
        registry
    }

    /// Returns `true` if a factory is registered under `key`.
    ///
    /// Never builds anything.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.factories.read().contains_key(key)
    }

    /// Returns `true` if an instance for `key` has already been built.
    #[must_use]
    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.read().contains_key(key)
    }

    /// Returns the registered keys in no particular order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.factories.read().keys().cloned().collect()
    }

    /// Returns the session injected into session-aware resources.
    #[must_use]
    pub const fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Resolves the instance for `key`, building and caching it on first use.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownResource`] if no factory is registered
    /// - [`RegistryError::CircularDependency`] if the factory for `key`
    ///   asks for `key` again while it is being built
    /// - any error the factory itself returns
    pub fn get(&self, key: &str) -> Result<Arc<dyn Resource>, RegistryError> {
        if let Some(instance) = self.cache.read().get(key) {
            return Ok(Arc::clone(instance));
        }

        let factory = self
            .factories
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownResource {
                key: key.to_string(),
            })?;

        // Cycle check first: the build lock is not re-entrant
        let _guard = ResolutionGuard::enter(&self.resolving, key)?;
        let build_lock = self.build_lock(key);
        let _building = build_lock.lock();

        if let Some(instance) = self.cache.read().get(key) {
            return Ok(Arc::clone(instance));
        }
        let built = self.build(factory)?;

        let mut cache = self.cache.write();
        let cached = cache.entry(key.to_string()).or_insert(built);
        tracing::debug!(key, "resource resolved");
        Ok(Arc::clone(cached))
    }

    /// Resolves `key` and downcasts it to the concrete type `T`.
    ///
    /// # Errors
    ///
    /// Everything [`get`](Self::get) returns, plus
    /// [`RegistryError::TypeMismatch`] when the instance is not a `T`.
    pub fn get_as<T: Resource>(&self, key: &str) -> Result<Arc<T>, RegistryError> {
        let instance = self.get(key)?;
        <dyn Resource as AsAny>::into_any(instance)
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                key: key.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Registers or replaces the factory for `key`.
    ///
    /// An instance already cached under `key` is kept and keeps being
    /// returned by [`get`](Self::get); call [`evict`](Self::evict) to
    /// have the new factory take effect.
    pub fn set(&self, key: impl Into<String>, factory: Factory) {
        let key = key.into();
        if self.is_cached(&key) {
            tracing::debug!(key = %key, "factory replaced while an instance is cached");
        }
        self.factories.write().insert(key, factory);
    }

    /// Drops the cached instance for `key`, returning it if one existed.
    ///
    /// The factory stays registered, so the next `get` rebuilds.
    pub fn evict(&self, key: &str) -> Option<Arc<dyn Resource>> {
        self.cache.write().remove(key)
    }

    fn build_lock(&self, key: &str) -> Arc<Mutex<()>> {
        Arc::clone(self.building.lock().entry(key.to_string()).or_default())
    }

    fn build(&self, factory: Factory) -> Result<Arc<dyn Resource>, RegistryError> {
        let mut instance = match factory {
            Factory::Instance(instance) => return Ok(instance),
            Factory::Callable(build) => build(self)?,
            Factory::Constructor(construct) => match construct() {
                Constructed::Ready(instance) => instance,
                Constructed::Deferred(deferred) => deferred.create(self)?,
            },
        };

        if let Some(aware) = instance.session_aware() {
            aware.set_session(Arc::clone(&self.session));
        }

        Ok(Arc::from(instance))
    }
}

impl ResourceContainer for ResourceRegistry {
    fn has(&self, key: &str) -> bool {
        Self::has(self, key)
    }

    fn get(&self, key: &str) -> Result<Arc<dyn Resource>, RegistryError> {
        Self::get(self, key)
    }
}

impl fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = self.keys();
        keys.sort();
        f.debug_struct("ResourceRegistry")
            .field("keys", &keys)
            .field("cached", &self.cache.read().len())
            .finish_non_exhaustive()
    }
}

/// Marks `(thread, key)` as under construction for the guard's lifetime.
struct ResolutionGuard<'a> {
    resolving: &'a Mutex<HashSet<(ThreadId, String)>>,
    entry: (ThreadId, String),
}

impl<'a> ResolutionGuard<'a> {
    fn enter(
        resolving: &'a Mutex<HashSet<(ThreadId, String)>>,
        key: &str,
    ) -> Result<Self, RegistryError> {
        let entry = (thread::current().id(), key.to_string());
        if !resolving.lock().insert(entry.clone()) {
            return Err(RegistryError::CircularDependency {
                key: key.to_string(),
            });
        }
        Ok(Self { resolving, entry })
    }
}

impl Drop for ResolutionGuard<'_> {
    fn drop(&mut self) {
        self.resolving.lock().remove(&self.entry);
    }
}
