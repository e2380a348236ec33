//! The application entity.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::errors::ApplicationError;
use super::feature::{
    EventType, FeatureConfig, MessagesConfig, MessagesEvent, RtcConfig, RtcEvent, VoiceConfig,
    VoiceEvent, WebhookLookup,
};
use super::vbc::VbcConfig;
use super::wire::{
    feature_webhooks, ApplicationBody, CapabilitiesBody, FeatureBody, KeysBody, RawApplication,
    VbcMarker,
};

/// How much of an application's feature configuration has been built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HydrationState {
    /// No feature config has been materialized.
    Unhydrated,
    /// Some feature configs were materialized through their getters or setters.
    PartiallyHydrated,
    /// [`Application::hydrate`] has run.
    FullyHydrated,
}

/// A feature config built at most once, on first access.
#[derive(Clone, Debug)]
struct Lazy<T> {
    cell: OnceLock<T>,
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }
}

impl<T> Lazy<T> {
    fn ready(value: T) -> Self {
        Self {
            cell: OnceLock::from(value),
        }
    }

    fn is_materialized(&self) -> bool {
        self.cell.get().is_some()
    }

    fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(init)
    }

    fn get_mut_or_init(&mut self, init: impl FnOnce() -> T) -> &mut T {
        if self.cell.get().is_none() {
            let _ = self.cell.set(init());
        }
        // The cell is filled here: `set` on an empty cell cannot fail and
        // nothing else can touch it while `&mut self` is held.
        match self.cell.get_mut() {
            Some(value) => value,
            None => unreachable!("lazy cell is filled before mutable access"),
        }
    }
}

#[derive(Clone, Default)]
struct Keys {
    public_key: Option<String>,
    private_key: Option<String>,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "*****"))
            .finish()
    }
}

/// A platform application: a name, a key pair, and per-feature webhooks.
///
/// Feature configs are materialized lazily. The first call to a feature
/// getter builds the config and, when response data is attached, fills it
/// from that data; later calls return the same config even if the attached
/// data changes. [`hydrate`](Self::hydrate) rebuilds every feature eagerly.
///
/// The private key is only ever read from responses and is never serialized.
///
/// # Example
///
/// ```rust
/// use nexmo_api::application::{Application, VoiceEvent};
/// use serde_json::json;
///
/// let mut application = Application::new();
/// application
///     .hydrate(&json!({
///         "name": "Test",
///         "capabilities": {
///             "voice": {
///                 "webhooks": {
///                     "answer": {"address": "https://x/a", "http_method": "POST"}
///                 }
///             }
///         }
///     }))
///     .unwrap();
///
/// let payload = serde_json::to_value(application.to_payload()).unwrap();
/// assert_eq!(
///     payload["capabilities"]["voice"]["webhooks"]["answer"],
///     json!({"address": "https://x/a", "http_method": "POST"})
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Application {
    id: Option<String>,
    name: Option<String>,
    keys: Keys,
    voice: Lazy<VoiceConfig>,
    messages: Lazy<MessagesConfig>,
    rtc: Lazy<RtcConfig>,
    vbc: Lazy<VbcConfig>,
    response_data: Option<Value>,
    fully_hydrated: bool,
}

// Verify Application is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Application>();
};

impl Application {
    /// Creates an application with no id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an application referring to an existing id.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Builds an application from a platform response.
    ///
    /// Hydrates from `data`, then keeps `data` attached so features the
    /// response did not describe under `capabilities` can still be filled
    /// lazily.
    ///
    /// # Errors
    ///
    /// See [`hydrate`](Self::hydrate).
    pub fn from_response(data: Value) -> Result<Self, ApplicationError> {
        let mut application = Self::new();
        application.hydrate(&data)?;
        application.set_response_data(data);
        Ok(application)
    }

    /// Returns the application id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the display name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the public key, if one is set.
    #[must_use]
    pub fn public_key(&self) -> Option<&str> {
        self.keys.public_key.as_deref()
    }

    /// Sets the public key.
    pub fn set_public_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.keys.public_key = Some(key.into());
        self
    }

    /// Returns the private key issued by the platform, if this instance was
    /// hydrated from a response carrying one.
    #[must_use]
    pub fn private_key(&self) -> Option<&str> {
        self.keys.private_key.as_deref()
    }

    /// Attaches a raw response payload for lazy feature hydration.
    ///
    /// Features already materialized are not affected.
    pub fn set_response_data(&mut self, data: Value) -> &mut Self {
        self.response_data = Some(data);
        self
    }

    /// Returns the attached response payload.
    #[must_use]
    pub const fn response_data(&self) -> Option<&Value> {
        self.response_data.as_ref()
    }

    /// Returns the voice config, materializing it on first access.
    #[must_use]
    pub fn voice_config(&self) -> &VoiceConfig {
        self.voice.get_or_init(|| self.hydrate_feature())
    }

    /// Returns the voice config for modification, materializing it on first access.
    pub fn voice_config_mut(&mut self) -> &mut VoiceConfig {
        let initial = self.initial_feature(self.voice.is_materialized());
        self.voice.get_mut_or_init(|| initial.unwrap_or_default())
    }

    /// Replaces the voice config.
    pub fn set_voice_config(&mut self, config: VoiceConfig) -> &mut Self {
        self.voice = Lazy::ready(config);
        self
    }

    /// Returns the messages config, materializing it on first access.
    #[must_use]
    pub fn messages_config(&self) -> &MessagesConfig {
        self.messages.get_or_init(|| self.hydrate_feature())
    }

    /// Returns the messages config for modification, materializing it on first access.
    pub fn messages_config_mut(&mut self) -> &mut MessagesConfig {
        let initial = self.initial_feature(self.messages.is_materialized());
        self.messages.get_mut_or_init(|| initial.unwrap_or_default())
    }

    /// Replaces the messages config.
    pub fn set_messages_config(&mut self, config: MessagesConfig) -> &mut Self {
        self.messages = Lazy::ready(config);
        self
    }

    /// Returns the RTC config, materializing it on first access.
    #[must_use]
    pub fn rtc_config(&self) -> &RtcConfig {
        self.rtc.get_or_init(|| self.hydrate_feature())
    }

    /// Returns the RTC config for modification, materializing it on first access.
    pub fn rtc_config_mut(&mut self) -> &mut RtcConfig {
        let initial = self.initial_feature(self.rtc.is_materialized());
        self.rtc.get_mut_or_init(|| initial.unwrap_or_default())
    }

    /// Replaces the RTC config.
    pub fn set_rtc_config(&mut self, config: RtcConfig) -> &mut Self {
        self.rtc = Lazy::ready(config);
        self
    }

    /// Returns the VBC flag, materializing it (disabled) on first access.
    #[must_use]
    pub fn vbc_config(&self) -> &VbcConfig {
        self.vbc.get_or_init(VbcConfig::new)
    }

    /// Returns the VBC flag for modification.
    pub fn vbc_config_mut(&mut self) -> &mut VbcConfig {
        self.vbc.get_mut_or_init(VbcConfig::new)
    }

    /// Replaces the VBC flag.
    pub fn set_vbc_config(&mut self, config: VbcConfig) -> &mut Self {
        self.vbc = Lazy::ready(config);
        self
    }

    /// Returns the three webhook features behind a token-addressed view,
    /// materializing each.
    #[must_use]
    pub fn webhook_features(&self) -> [&dyn WebhookLookup; 3] {
        [self.voice_config(), self.messages_config(), self.rtc_config()]
    }

    /// Returns how far feature hydration has progressed.
    #[must_use]
    pub fn hydration_state(&self) -> HydrationState {
        if self.fully_hydrated {
            HydrationState::FullyHydrated
        } else if self.voice.is_materialized()
            || self.messages.is_materialized()
            || self.rtc.is_materialized()
            || self.vbc.is_materialized()
        {
            HydrationState::PartiallyHydrated
        } else {
            HydrationState::Unhydrated
        }
    }

    /// Populates this application from a raw payload.
    ///
    /// `name` is required; `id` and `keys` are optional. When `capabilities`
    /// is present, all three webhook features are rebuilt from it, replacing
    /// any materialized configs, and VBC is enabled exactly when a `vbc` key
    /// is present. Webhook entries that do not parse are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::MalformedPayload`] if a field has the wrong JSON type
    /// - [`ApplicationError::MissingRequiredField`] if `name` is absent
    pub fn hydrate(&mut self, data: &Value) -> Result<(), ApplicationError> {
        let raw = RawApplication::deserialize(data)?;
        let name = raw
            .name
            .ok_or(ApplicationError::MissingRequiredField { field: "name" })?;

        self.name = Some(name);
        self.id = raw.id;
        let keys = raw.keys.unwrap_or_default();
        self.keys = Keys {
            public_key: keys.public_key,
            private_key: keys.private_key,
        };

        if let Some(capabilities) = raw.capabilities {
            self.voice = Lazy::ready(feature_webhooks(capabilities.get(VoiceEvent::FEATURE)));
            self.messages = Lazy::ready(feature_webhooks(
                capabilities.get(MessagesEvent::FEATURE),
            ));
            self.rtc = Lazy::ready(feature_webhooks(capabilities.get(RtcEvent::FEATURE)));

            let mut vbc = VbcConfig::new();
            if capabilities.get("vbc").is_some() {
                vbc.enable();
            }
            self.vbc = Lazy::ready(vbc);
        }

        self.fully_hydrated = true;
        tracing::debug!(id = self.id(), "application hydrated");
        Ok(())
    }

    /// Builds the outward wire representation.
    ///
    /// Capabilities are assembled through the feature getters, so features
    /// not yet materialized are hydrated from attached response data first.
    #[must_use]
    pub fn to_payload(&self) -> ApplicationBody {
        let capabilities = CapabilitiesBody {
            voice: FeatureBody::from_config(self.voice_config()),
            messages: FeatureBody::from_config(self.messages_config()),
            rtc: FeatureBody::from_config(self.rtc_config()),
            vbc: self.vbc_config().is_enabled().then_some(VbcMarker {}),
        };

        ApplicationBody {
            id: self.id.clone(),
            name: self.name.clone(),
            keys: KeysBody {
                public_key: self.keys.public_key.clone(),
            },
            capabilities,
        }
    }

    fn hydrate_feature<E: EventType>(&self) -> FeatureConfig<E> {
        let Some(data) = &self.response_data else {
            return FeatureConfig::new();
        };
        let node = data.get(E::FEATURE).or_else(|| {
            data.get("capabilities")
                .and_then(|capabilities| capabilities.get(E::FEATURE))
        });
        feature_webhooks(node)
    }

    fn initial_feature<E: EventType>(&self, materialized: bool) -> Option<FeatureConfig<E>> {
        if materialized {
            None
        } else {
            Some(self.hydrate_feature())
        }
    }
}

impl Serialize for Application {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id().unwrap_or_default())
    }
}
