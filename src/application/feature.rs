//! Per-feature webhook configuration.
//!
//! Voice, Messages, and RTC each carry a set of webhooks keyed by event
//! type. The event types form a closed set per feature, expressed as an enum
//! implementing [`EventType`], so only recognized tokens can be stored.
//!
//! | Feature    | Event types            |
//! |------------|------------------------|
//! | `voice`    | `answer`, `event`      |
//! | `messages` | `inbound`, `status`    |
//! | `rtc`      | `event`                |

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ValidationError;

use super::webhook::{Webhook, WebhookMethod};

/// Closed set of event types for one feature.
pub trait EventType: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// Feature name as it appears on the wire (`"voice"`, `"messages"`, `"rtc"`).
    const FEATURE: &'static str;

    /// Every event type of the feature, in serialization order.
    const ALL: &'static [Self];

    /// Returns the wire token for this event type.
    fn as_str(self) -> &'static str;

    /// Looks up an event type by its wire token.
    #[must_use]
    fn parse(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|event| event.as_str() == token)
    }
}

/// Voice webhook event types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VoiceEvent {
    /// Called when an inbound call is answered.
    Answer,
    /// Receives call status events.
    Event,
}

impl EventType for VoiceEvent {
    const FEATURE: &'static str = "voice";
    const ALL: &'static [Self] = &[Self::Answer, Self::Event];

    fn as_str(self) -> &'static str {
        match self {
            Self::Answer => "answer",
            Self::Event => "event",
        }
    }
}

/// Messages webhook event types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessagesEvent {
    /// Receives inbound messages.
    Inbound,
    /// Receives delivery status updates.
    Status,
}

impl EventType for MessagesEvent {
    const FEATURE: &'static str = "messages";
    const ALL: &'static [Self] = &[Self::Inbound, Self::Status];

    fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Status => "status",
        }
    }
}

/// RTC webhook event types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RtcEvent {
    /// Receives conversation events.
    Event,
}

impl EventType for RtcEvent {
    const FEATURE: &'static str = "rtc";
    const ALL: &'static [Self] = &[Self::Event];

    fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
        }
    }
}

/// Webhooks for one feature, keyed by event type.
///
/// # Example
///
/// ```rust
/// use nexmo_api::application::{VoiceConfig, VoiceEvent, Webhook, WebhookMethod};
///
/// let mut voice = VoiceConfig::new();
/// voice
///     .set_webhook_url(VoiceEvent::Answer, "https://example.com/answer", "GET")
///     .unwrap();
/// voice.set_webhook(
///     VoiceEvent::Event,
///     Webhook::new("https://example.com/event", WebhookMethod::Post).unwrap(),
/// );
///
/// assert_eq!(
///     voice.webhook(VoiceEvent::Answer).unwrap().address(),
///     "https://example.com/answer"
/// );
/// assert_eq!(voice.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureConfig<E: EventType> {
    webhooks: BTreeMap<E, Webhook>,
}

/// Voice capability webhooks.
pub type VoiceConfig = FeatureConfig<VoiceEvent>;
/// Messages capability webhooks.
pub type MessagesConfig = FeatureConfig<MessagesEvent>;
/// RTC capability webhooks.
pub type RtcConfig = FeatureConfig<RtcEvent>;

impl<E: EventType> Default for FeatureConfig<E> {
    fn default() -> Self {
        Self {
            webhooks: BTreeMap::new(),
        }
    }
}

impl<E: EventType> FeatureConfig<E> {
    /// Creates an empty config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `webhook` under `event`, replacing any previous entry.
    pub fn set_webhook(&mut self, event: E, webhook: Webhook) -> &mut Self {
        self.webhooks.insert(event, webhook);
        self
    }

    /// Builds a webhook from a raw address and method token and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the address is empty or the method is
    /// not GET or POST. The config is left unchanged on error.
    pub fn set_webhook_url(
        &mut self,
        event: E,
        address: impl Into<String>,
        method: &str,
    ) -> Result<&mut Self, ValidationError> {
        let webhook = Webhook::parse(address, method)?;
        Ok(self.set_webhook(event, webhook))
    }

    /// Returns the webhook for `event`, or `None` if it was never set.
    #[must_use]
    pub fn webhook(&self, event: E) -> Option<&Webhook> {
        self.webhooks.get(&event)
    }

    /// Removes and returns the webhook for `event`.
    pub fn remove_webhook(&mut self, event: E) -> Option<Webhook> {
        self.webhooks.remove(&event)
    }

    /// Returns `true` if no webhook is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.webhooks.is_empty()
    }

    /// Returns the number of webhooks set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.webhooks.len()
    }

    /// Iterates over the set webhooks in event-type order.
    pub fn iter(&self) -> impl Iterator<Item = (E, &Webhook)> + '_ {
        self.webhooks.iter().map(|(event, webhook)| (*event, webhook))
    }

    /// Stores a webhook from a raw token triple, skipping anything malformed.
    pub(crate) fn absorb(&mut self, token: &str, address: &str, method: &str) {
        let Some(event) = E::parse(token) else {
            tracing::warn!(
                feature = E::FEATURE,
                event = token,
                "skipping webhook with unknown event type"
            );
            return;
        };

        match Webhook::parse(address, method) {
            Ok(webhook) => {
                self.set_webhook(event, webhook);
            }
            Err(error) => {
                tracing::warn!(
                    feature = E::FEATURE,
                    event = token,
                    %error,
                    "skipping malformed webhook"
                );
            }
        }
    }
}

impl<E: EventType> WebhookLookup for FeatureConfig<E> {
    fn feature(&self) -> &'static str {
        E::FEATURE
    }

    fn webhook_for(&self, token: &str) -> Option<(&str, WebhookMethod)> {
        E::parse(token)
            .and_then(|event| self.webhook(event))
            .map(|webhook| (webhook.address(), webhook.method()))
    }
}

/// Object-safe view over any feature config, addressed by raw token.
///
/// Lets code handle Voice, Messages, and RTC uniformly without knowing the
/// concrete event enum.
pub trait WebhookLookup {
    /// Returns the feature name.
    fn feature(&self) -> &'static str;

    /// Returns the address and method stored for `token`, if any.
    ///
    /// Unknown tokens behave like unset event types.
    fn webhook_for(&self, token: &str) -> Option<(&str, WebhookMethod)>;
}
