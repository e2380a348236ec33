//! Wire representations of the application resource.
//!
//! The write shape ([`ApplicationBody`]) is what the platform accepts on
//! create and update. Reads may nest webhooks differently: as a list of
//! `{endpoint_type, endpoint, http_method}` entries instead of a map keyed
//! by event type. [`feature_webhooks`] accepts both.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::feature::{EventType, FeatureConfig};
use super::webhook::{Webhook, WebhookMethod};

/// Serialized form of an application, as sent to the platform.
///
/// `id`, `name`, and `keys.public_key` are always present and serialize as
/// `null` when unset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationBody {
    /// Application identifier.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Public half of the key pair.
    pub keys: KeysBody,
    /// Configured capabilities.
    pub capabilities: CapabilitiesBody,
}

/// The outward-facing key pair: only the public key is ever sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysBody {
    /// PEM-encoded public key.
    pub public_key: Option<String>,
}

/// Capabilities keyed by feature name.
///
/// Unset features are omitted, so a value with nothing set serializes as
/// `{}`. This type never serializes as a sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitiesBody {
    /// Voice webhooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<FeatureBody>,
    /// Messages webhooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<FeatureBody>,
    /// RTC webhooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtc: Option<FeatureBody>,
    /// VBC presence marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vbc: Option<VbcMarker>,
}

impl CapabilitiesBody {
    /// Returns `true` if no capability is populated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.voice.is_none() && self.messages.is_none() && self.rtc.is_none() && self.vbc.is_none()
    }
}

/// Webhooks of one feature, keyed by event-type token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureBody {
    /// Event token to endpoint.
    pub webhooks: BTreeMap<String, WebhookBody>,
}

impl FeatureBody {
    /// Collects the set webhooks of `config` over its closed event set.
    ///
    /// Returns `None` when no webhook is set, so the feature is omitted.
    pub(crate) fn from_config<E: EventType>(config: &FeatureConfig<E>) -> Option<Self> {
        let webhooks: BTreeMap<String, WebhookBody> = E::ALL
            .iter()
            .filter_map(|event| {
                config
                    .webhook(*event)
                    .map(|webhook| (event.as_str().to_string(), WebhookBody::from(webhook)))
            })
            .collect();

        if webhooks.is_empty() {
            None
        } else {
            Some(Self { webhooks })
        }
    }
}

/// One endpoint in write shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookBody {
    /// Destination address.
    pub address: String,
    /// HTTP method.
    pub http_method: WebhookMethod,
}

impl From<&Webhook> for WebhookBody {
    fn from(webhook: &Webhook) -> Self {
        Self {
            address: webhook.address().to_string(),
            http_method: webhook.method(),
        }
    }
}

/// Presence-only marker; serializes as `{}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VbcMarker {}

/// Top-level fields read during full hydration.
#[derive(Debug, Deserialize)]
pub(crate) struct RawApplication {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub keys: Option<RawKeys>,
    #[serde(default)]
    pub capabilities: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawKeys {
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
}

/// Webhook list in either shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawWebhooks {
    Listed(Vec<Value>),
    Keyed(Map<String, Value>),
}

/// Read-shape list entry.
#[derive(Debug, Deserialize)]
struct ListedWebhook {
    endpoint_type: String,
    endpoint: String,
    http_method: String,
}

/// Write-shape map value.
#[derive(Debug, Deserialize)]
struct KeyedWebhook {
    address: String,
    http_method: String,
}

/// Builds a feature config from a feature node (`{"webhooks": ...}`).
///
/// Entries that do not parse are skipped with a warning.
pub(crate) fn feature_webhooks<E: EventType>(feature: Option<&Value>) -> FeatureConfig<E> {
    let mut config = FeatureConfig::new();
    let Some(webhooks) = feature.and_then(|node| node.get("webhooks")) else {
        return config;
    };

    match RawWebhooks::deserialize(webhooks) {
        Ok(RawWebhooks::Listed(entries)) => {
            for entry in &entries {
                match ListedWebhook::deserialize(entry) {
                    Ok(listed) => {
                        config.absorb(&listed.endpoint_type, &listed.endpoint, &listed.http_method);
                    }
                    Err(error) => warn_malformed::<E>(&error),
                }
            }
        }
        Ok(RawWebhooks::Keyed(entries)) => {
            for (token, entry) in &entries {
                match KeyedWebhook::deserialize(entry) {
                    Ok(keyed) => config.absorb(token, &keyed.address, &keyed.http_method),
                    Err(error) => warn_malformed::<E>(&error),
                }
            }
        }
        Err(error) => warn_malformed::<E>(&error),
    }

    config
}

fn warn_malformed<E: EventType>(error: &serde_json::Error) {
    tracing::warn!(feature = E::FEATURE, %error, "skipping malformed webhook entry");
}
