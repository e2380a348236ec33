//! Integration tests for the resource registry.
//!
//! These tests verify lazy construction, identity-stable caching, session
//! injection, and the keyed-lookup contract through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Barrier, Mutex};
use std::time::Duration;

use nexmo_api::application::{ApplicationClient, ApplicationError};
use nexmo_api::registry::{
    Factory, RegistryError, Resource, ResourceContainer, ResourceFactory, ResourceRegistry,
};
use nexmo_api::{ApiKey, ApiSecret, Client, NexmoConfig, Session};

fn create_test_config() -> NexmoConfig {
    NexmoConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .api_secret(ApiSecret::new("test-secret").unwrap())
        .build()
        .unwrap()
}

fn create_test_registry() -> ResourceRegistry {
    ResourceRegistry::new(Arc::new(Session::new(create_test_config())))
}

#[derive(Default)]
struct Pricing;
impl Resource for Pricing {}

struct Reports {
    pricing: Arc<Pricing>,
}
impl Resource for Reports {}

#[derive(Default)]
struct ReportsFactory;

impl ResourceFactory for ReportsFactory {
    fn create(
        self: Box<Self>,
        registry: &ResourceRegistry,
    ) -> Result<Box<dyn Resource>, RegistryError> {
        Ok(Box::new(Reports {
            pricing: registry.get_as("pricing")?,
        }))
    }
}

/// Resolves through the trait object only.
fn resolve(container: &dyn ResourceContainer, key: &str) -> Option<Arc<dyn Resource>> {
    if container.has(key) {
        container.get(key).ok()
    } else {
        None
    }
}

// ============================================================================
// Idempotence and Unknown Keys
// ============================================================================

#[test]
fn test_every_registered_key_resolves_to_one_instance() {
    let client = Client::new(create_test_config());
    let registry = client.registry();
    registry.set("pricing", Factory::of::<Pricing>());

    for key in registry.keys() {
        let first = registry.get(&key).unwrap();
        let second = registry.get(&key).unwrap();
        assert!(Arc::ptr_eq(&first, &second), "key `{key}` was rebuilt");
    }
}

#[test]
fn test_unknown_key_is_reported_by_name() {
    let registry = create_test_registry();

    let error = registry.get("nonexistent").err().unwrap();

    assert!(!registry.has("nonexistent"));
    assert_eq!(error.to_string(), "no map defined for `nonexistent`");
}

// ============================================================================
// Factory Kinds
// ============================================================================

#[test]
fn test_callable_factory_receives_registry_for_dependencies() {
    let registry = create_test_registry();
    registry.set("pricing", Factory::of::<Pricing>());
    registry.set(
        "reports",
        Factory::callable(|registry| {
            Ok(Box::new(Reports {
                pricing: registry.get_as("pricing")?,
            }))
        }),
    );

    let reports = registry.get_as::<Reports>("reports").unwrap();

    assert!(Arc::ptr_eq(
        &reports.pricing,
        &registry.get_as::<Pricing>("pricing").unwrap()
    ));
}

#[test]
fn test_deferred_factory_fails_when_dependency_missing() {
    let registry = create_test_registry();
    registry.set("reports", Factory::deferred::<ReportsFactory>());

    let error = registry.get("reports").err().unwrap();

    assert_eq!(
        error,
        RegistryError::UnknownResource {
            key: "pricing".to_string()
        }
    );
    assert!(!registry.is_cached("reports"));
}

#[test]
fn test_concurrent_first_gets_build_once() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);
    let registry = Arc::new(create_test_registry());
    registry.set(
        "pricing",
        Factory::callable(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(100));
            Ok(Box::new(Pricing))
        }),
    );

    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                registry.get("pricing").unwrap()
            })
        })
        .collect();
    let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    for instance in &instances[1..] {
        assert!(Arc::ptr_eq(&instances[0], instance));
    }
}

#[test]
fn test_slow_build_does_not_block_other_keys() {
    let registry = Arc::new(create_test_registry());
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let started_tx = Mutex::new(started_tx);
    let release_rx = Mutex::new(release_rx);
    registry.set(
        "reports",
        Factory::callable(move |_| {
            let _ = started_tx.lock().unwrap().send(());
            let _ = release_rx.lock().unwrap().recv();
            Ok(Box::new(Pricing))
        }),
    );
    registry.set("pricing", Factory::of::<Pricing>());

    let slow = {
        let registry = Arc::clone(&registry);
        std::thread::spawn(move || registry.get("reports").unwrap())
    };
    started_rx.recv().unwrap();

    // "reports" is still building here
    assert!(registry.get("pricing").is_ok());

    release_tx.send(()).unwrap();
    slow.join().unwrap();
    assert!(registry.is_cached("reports"));
}

// ============================================================================
// Session Injection
// ============================================================================

#[test]
fn test_instance_entries_skip_session_injection() {
    let registry = create_test_registry();
    registry.set("applications", Factory::instance(ApplicationClient::default()));

    let applications = registry
        .get_as::<ApplicationClient>("applications")
        .unwrap();
    let result = tokio_test::block_on(applications.get("abc"));

    assert!(matches!(result, Err(ApplicationError::SessionNotConfigured)));
}

#[test]
fn test_constructed_entries_receive_session() {
    let client = Client::new(create_test_config());

    let applications = client.applications().unwrap();
    let result = tokio_test::block_on(applications.update(&nexmo_api::Application::new()));

    // The session is present, so the failure comes from the missing id
    assert!(matches!(
        result,
        Err(ApplicationError::MissingRequiredField { field: "id" })
    ));
}

// ============================================================================
// Replacement
// ============================================================================

#[test]
fn test_set_does_not_replace_cached_instance() {
    let client = Client::new(create_test_config());
    let original = client.verify().unwrap();

    client.registry().set("verify", Factory::of::<Pricing>());

    assert!(Arc::ptr_eq(&original, &client.verify().unwrap()));

    client.registry().evict("verify");
    assert!(matches!(
        client.verify(),
        Err(RegistryError::TypeMismatch { .. })
    ));
}

#[test]
fn test_registry_usable_as_container() {
    let client = Client::new(create_test_config());

    assert!(resolve(client.registry(), "applications").is_some());
    assert!(resolve(client.registry(), "numbers").is_none());
}
