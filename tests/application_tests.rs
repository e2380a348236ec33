//! Integration tests for the application model.
//!
//! These tests cover hydration, lazy feature materialization, and the wire
//! format produced for the platform.

use nexmo_api::application::{
    Application, HydrationState, MessagesEvent, RtcEvent, VoiceConfig, VoiceEvent, Webhook,
    WebhookMethod,
};
use serde_json::{json, Value};

fn full_capabilities_payload() -> Value {
    json!({
        "id": "78d335fa-323d-0114-9c3d-d6f0d48968cf",
        "name": "Round Trip",
        "keys": {"public_key": "-----BEGIN PUBLIC KEY-----"},
        "capabilities": {
            "voice": {"webhooks": {
                "answer": {"address": "https://example.com/answer", "http_method": "GET"},
                "event": {"address": "https://example.com/event", "http_method": "POST"}
            }},
            "messages": {"webhooks": {
                "inbound": {"address": "https://example.com/inbound", "http_method": "POST"},
                "status": {"address": "https://example.com/status", "http_method": "POST"}
            }},
            "rtc": {"webhooks": {
                "event": {"address": "https://example.com/rtc", "http_method": "POST"}
            }},
            "vbc": {}
        }
    })
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_hydrate_then_payload_reproduces_capabilities() {
    let payload = full_capabilities_payload();
    let mut application = Application::new();
    application.hydrate(&payload).unwrap();

    let serialized = serde_json::to_value(application.to_payload()).unwrap();

    assert_eq!(serialized["capabilities"], payload["capabilities"]);
    assert_eq!(serialized["id"], payload["id"]);
    assert_eq!(serialized["name"], "Round Trip");
    assert_eq!(serialized["keys"], payload["keys"]);
}

#[test]
fn test_single_voice_webhook_example() {
    let mut application = Application::new();
    application
        .hydrate(&json!({
            "name": "Test",
            "capabilities": {"voice": {"webhooks": {
                "answer": {"address": "https://x/a", "http_method": "POST"}
            }}}
        }))
        .unwrap();

    let serialized = serde_json::to_value(&application).unwrap();

    assert_eq!(
        serialized["capabilities"]["voice"]["webhooks"]["answer"],
        json!({"address": "https://x/a", "http_method": "POST"})
    );
    assert!(serialized["capabilities"].get("messages").is_none());
    assert!(serialized["capabilities"].get("vbc").is_none());
}

#[test]
fn test_vbc_presence_enables_regardless_of_value() {
    let mut application = Application::new();
    application
        .hydrate(&json!({"name": "VBC", "capabilities": {"vbc": null}}))
        .unwrap();

    assert!(application.vbc_config().is_enabled());

    application
        .hydrate(&json!({"name": "VBC", "capabilities": {"voice": {}}}))
        .unwrap();
    assert!(!application.vbc_config().is_enabled());
}

// ============================================================================
// Empty Capabilities
// ============================================================================

#[test]
fn test_empty_capabilities_serialize_as_object() {
    let mut application = Application::with_id("abc");
    application.set_name("Nothing configured");

    let serialized = serde_json::to_string(&application).unwrap();

    assert!(serialized.contains(r#""capabilities":{}"#));
    assert!(!serialized.contains(r#""capabilities":[]"#));
}

#[test]
fn test_disabled_vbc_and_cleared_webhooks_still_serialize_as_object() {
    let mut application = Application::new();
    application.hydrate(&full_capabilities_payload()).unwrap();
    application.set_voice_config(VoiceConfig::new());
    application.messages_config_mut().remove_webhook(MessagesEvent::Inbound);
    application.messages_config_mut().remove_webhook(MessagesEvent::Status);
    application.rtc_config_mut().remove_webhook(RtcEvent::Event);
    application.vbc_config_mut().disable();

    let serialized = serde_json::to_value(&application).unwrap();

    assert_eq!(serialized["capabilities"], json!({}));
}

// ============================================================================
// Lazy Hydration
// ============================================================================

#[test]
fn test_lazy_getter_hydrates_once_from_read_shape() {
    let mut application = Application::with_id("abc");
    application.set_response_data(json!({
        "voice": {"webhooks": [
            {"endpoint_type": "answer", "endpoint": "https://example.com/answer", "http_method": "GET"}
        ]}
    }));
    assert_eq!(application.hydration_state(), HydrationState::Unhydrated);

    let first: *const VoiceConfig = application.voice_config();
    assert_eq!(application.hydration_state(), HydrationState::PartiallyHydrated);

    application.set_response_data(json!({
        "voice": {"webhooks": [
            {"endpoint_type": "answer", "endpoint": "https://changed.example", "http_method": "POST"}
        ]}
    }));
    let second = application.voice_config();

    assert!(std::ptr::eq(first, second));
    let answer = second.webhook(VoiceEvent::Answer).unwrap();
    assert_eq!(answer.address(), "https://example.com/answer");
    assert_eq!(answer.method(), WebhookMethod::Get);
}

#[test]
fn test_payload_hydrates_unmaterialized_features_from_response_data() {
    let mut application = Application::with_id("abc");
    application.set_name("Stale data");
    application.set_response_data(json!({
        "messages": {"webhooks": [
            {"endpoint_type": "status", "endpoint": "https://example.com/status", "http_method": "POST"}
        ]}
    }));

    let serialized = serde_json::to_value(&application).unwrap();

    assert_eq!(
        serialized["capabilities"]["messages"]["webhooks"]["status"]["address"],
        "https://example.com/status"
    );
    assert_eq!(application.hydration_state(), HydrationState::PartiallyHydrated);
}

#[test]
fn test_hydrate_reaches_fully_hydrated_from_any_state() {
    let mut application = Application::new();
    let _ = application.rtc_config();
    assert_eq!(application.hydration_state(), HydrationState::PartiallyHydrated);

    application.hydrate(&full_capabilities_payload()).unwrap();

    assert_eq!(application.hydration_state(), HydrationState::FullyHydrated);
    assert!(application.rtc_config().webhook(RtcEvent::Event).is_some());
}

// ============================================================================
// Feature Isolation
// ============================================================================

#[test]
fn test_voice_webhook_does_not_leak_into_other_features() {
    let mut application = Application::new();
    application.voice_config_mut().set_webhook(
        VoiceEvent::Event,
        Webhook::new("https://example.com/event", WebhookMethod::Post).unwrap(),
    );

    assert!(application.messages_config().is_empty());
    assert!(application.rtc_config().webhook(RtcEvent::Event).is_none());
    assert_eq!(application.voice_config().len(), 1);

    let serialized = serde_json::to_value(&application).unwrap();
    let capabilities = serialized["capabilities"].as_object().unwrap();
    assert_eq!(capabilities.keys().collect::<Vec<_>>(), vec!["voice"]);
}

#[test]
fn test_private_key_is_read_only() {
    let application = Application::from_response(json!({
        "id": "abc",
        "name": "Keys",
        "keys": {"public_key": "PUB", "private_key": "PRIV"}
    }))
    .unwrap();

    assert_eq!(application.private_key(), Some("PRIV"));
    assert_eq!(
        serde_json::to_value(&application).unwrap()["keys"],
        json!({"public_key": "PUB"})
    );
}
