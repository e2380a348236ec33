//! Applications: named containers of capability configuration.
//!
//! An [`Application`] groups webhooks by feature (Voice, Messages, RTC) and
//! carries a VBC presence flag. Feature configs are materialized lazily from
//! attached response data, or eagerly by [`Application::hydrate`].
//!
//! # Wire format
//!
//! ```json
//! {
//!   "id": "...",
//!   "name": "...",
//!   "keys": { "public_key": "..." },
//!   "capabilities": {
//!     "voice":    { "webhooks": { "answer": {"address": "...", "http_method": "GET"} } },
//!     "messages": { "webhooks": { "inbound": {...}, "status": {...} } },
//!     "rtc":      { "webhooks": { "event": {...} } },
//!     "vbc": {}
//!   }
//! }
//! ```
//!
//! `capabilities` is `{}` when nothing is configured; it is never an array.
//!
//! # Example
//!
//! ```rust
//! use nexmo_api::application::{Application, MessagesEvent, VoiceEvent};
//! use serde_json::json;
//!
//! let mut application = Application::new();
//! application.set_name("Support line");
//! application
//!     .voice_config_mut()
//!     .set_webhook_url(VoiceEvent::Answer, "https://example.com/answer", "GET")
//!     .unwrap();
//!
//! assert!(application.messages_config().webhook(MessagesEvent::Inbound).is_none());
//!
//! let payload = serde_json::to_value(&application).unwrap();
//! assert_eq!(
//!     payload["capabilities"],
//!     json!({"voice": {"webhooks": {
//!         "answer": {"address": "https://example.com/answer", "http_method": "GET"}
//!     }}})
//! );
//! ```

mod client;
mod entity;
mod errors;
mod feature;
mod vbc;
mod webhook;
mod wire;

pub use client::ApplicationClient;
pub use entity::{Application, HydrationState};
pub use errors::ApplicationError;
pub use feature::{
    EventType, FeatureConfig, MessagesConfig, MessagesEvent, RtcConfig, RtcEvent, VoiceConfig,
    VoiceEvent, WebhookLookup,
};
pub use vbc::VbcConfig;
pub use webhook::{Webhook, WebhookMethod};
pub use wire::{ApplicationBody, CapabilitiesBody, FeatureBody, KeysBody, VbcMarker, WebhookBody};
