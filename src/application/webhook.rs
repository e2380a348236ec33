//! Callback endpoint value object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// HTTP method the platform uses when calling a webhook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
}

impl WebhookMethod {
    /// Returns the wire token (`"GET"` or `"POST"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for WebhookMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(Self::Post)
        } else {
            Err(ValidationError::invalid(
                "http_method",
                format!("unsupported webhook method `{s}`, expected GET or POST"),
            ))
        }
    }
}

/// One callback endpoint: where the platform sends an event and how.
///
/// Webhooks are immutable; replace one by setting a new webhook for the same
/// event type on its feature config.
///
/// # Example
///
/// ```rust
/// use nexmo_api::application::{Webhook, WebhookMethod};
///
/// let webhook = Webhook::new("https://example.com/answer", WebhookMethod::Get).unwrap();
/// assert_eq!(webhook.address(), "https://example.com/answer");
/// assert_eq!(webhook.method(), WebhookMethod::Get);
///
/// assert!(Webhook::new("", WebhookMethod::Post).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Webhook {
    address: String,
    method: WebhookMethod,
}

impl Webhook {
    /// Creates a webhook.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `address` is empty or only whitespace.
    pub fn new(address: impl Into<String>, method: WebhookMethod) -> Result<Self, ValidationError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(ValidationError::invalid(
                "address",
                "webhook address cannot be empty",
            ));
        }
        Ok(Self { address, method })
    }

    /// Creates a webhook from a raw address and method token.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for an empty address or an unknown method.
    pub fn parse(address: impl Into<String>, method: &str) -> Result<Self, ValidationError> {
        Self::new(address, method.parse()?)
    }

    /// Returns the destination address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> WebhookMethod {
        self.method
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parses_case_insensitively() {
        assert_eq!("get".parse::<WebhookMethod>().unwrap(), WebhookMethod::Get);
        assert_eq!("Post".parse::<WebhookMethod>().unwrap(), WebhookMethod::Post);
    }

    #[test]
    fn test_unknown_method_names_field() {
        let error = "PATCH".parse::<WebhookMethod>().unwrap_err();
        assert_eq!(error.field(), "http_method");
        assert!(error.to_string().contains("PATCH"));
    }

    #[test]
    fn test_method_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(WebhookMethod::Post).unwrap(),
            serde_json::json!("POST")
        );
        let parsed: WebhookMethod = serde_json::from_value(serde_json::json!("GET")).unwrap();
        assert_eq!(parsed, WebhookMethod::Get);
    }

    #[test]
    fn test_empty_address_rejected() {
        let error = Webhook::new("   ", WebhookMethod::Get).unwrap_err();
        assert_eq!(error.field(), "address");
    }

    #[test]
    fn test_parse_from_raw_pair() {
        let webhook = Webhook::parse("https://example.com/event", "post").unwrap();
        assert_eq!(webhook.method(), WebhookMethod::Post);
        assert_eq!(webhook.address(), "https://example.com/event");
    }
}
