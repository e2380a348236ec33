//! The verification request value object.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

use super::errors::VerifyError;

/// Parameters for starting a verification.
///
/// Every setter validates its input immediately; an invalid value is
/// rejected with a [`ValidationError`] naming the field and leaves the
/// request unchanged.
///
/// # Example
///
/// ```rust
/// use nexmo_api::verify::VerifyRequest;
///
/// let mut request = VerifyRequest::new("14845551212", "Acme", 1).unwrap();
/// request.set_country("US").unwrap().set_code_length(6).unwrap();
///
/// assert!(request.set_pin_expiry(30).is_err());
/// assert_eq!(request.pin_expiry(), 300);
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["country"], "US");
/// assert_eq!(body["code_length"], 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyRequest {
    number: String,
    brand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    sender_id: String,
    code_length: u32,
    #[serde(rename = "lg", skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
    pin_expiry: u32,
    next_event_wait: u32,
    workflow_id: u32,
}

/// Recognized keys for [`VerifyRequest::hydrate`].
#[derive(Debug, Deserialize)]
struct RawVerifyRequest {
    sender_id: Option<String>,
    code_length: Option<u32>,
    pin_expiry: Option<u32>,
    next_event_wait: Option<u32>,
    workflow_id: Option<u32>,
    country: Option<String>,
    lg: Option<String>,
}

impl VerifyRequest {
    /// SMS, then TTS, then TTS.
    pub const WORKFLOW_SMS_TTS_TTS: u32 = 1;
    /// SMS, SMS, then TTS.
    pub const WORKFLOW_SMS_SMS_TTS: u32 = 2;
    /// TTS, then TTS.
    pub const WORKFLOW_TTS_TTS: u32 = 3;
    /// SMS, then SMS.
    pub const WORKFLOW_SMS_SMS: u32 = 4;
    /// SMS, then TTS.
    pub const WORKFLOW_SMS_TTS: u32 = 5;
    /// SMS only.
    pub const WORKFLOW_SMS: u32 = 6;
    /// TTS only.
    pub const WORKFLOW_TTS: u32 = 7;

    /// Creates a request with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `workflow_id` is outside 1..=7.
    pub fn new(
        number: impl Into<String>,
        brand: impl Into<String>,
        workflow_id: u32,
    ) -> Result<Self, ValidationError> {
        let mut request = Self {
            number: number.into(),
            brand: brand.into(),
            country: None,
            sender_id: "VERIFY".to_string(),
            code_length: 4,
            locale: None,
            pin_expiry: 300,
            next_event_wait: 300,
            workflow_id: Self::WORKFLOW_SMS_TTS_TTS,
        };
        request.set_workflow_id(workflow_id)?;
        Ok(request)
    }

    /// Returns the number to verify.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the brand named in the message.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Returns the two-character country code, if set.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Sets the two-character country code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] unless `country` is exactly two characters.
    pub fn set_country(&mut self, country: impl Into<String>) -> Result<&mut Self, ValidationError> {
        let country = country.into();
        if country.chars().count() != 2 {
            return Err(ValidationError::invalid(
                "country",
                "Country must be in two character format",
            ));
        }
        self.country = Some(country);
        Ok(self)
    }

    /// Returns the sender id.
    #[must_use]
    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    /// Sets the sender id.
    pub fn set_sender_id(&mut self, sender_id: impl Into<String>) -> &mut Self {
        self.sender_id = sender_id.into();
        self
    }

    /// Returns the PIN length.
    #[must_use]
    pub const fn code_length(&self) -> u32 {
        self.code_length
    }

    /// Sets the PIN length.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] unless `code_length` is 4 or 6.
    pub fn set_code_length(&mut self, code_length: u32) -> Result<&mut Self, ValidationError> {
        if !matches!(code_length, 4 | 6) {
            return Err(ValidationError::invalid(
                "code_length",
                "Pin length must be either 4 or 6 digits",
            ));
        }
        self.code_length = code_length;
        Ok(self)
    }

    /// Returns the message locale, if set.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Sets the message locale (sent as `lg`).
    pub fn set_locale(&mut self, locale: impl Into<String>) -> &mut Self {
        self.locale = Some(locale.into());
        self
    }

    /// Returns the PIN lifetime in seconds.
    #[must_use]
    pub const fn pin_expiry(&self) -> u32 {
        self.pin_expiry
    }

    /// Sets the PIN lifetime in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] unless `pin_expiry` is within 60..=3600.
    pub fn set_pin_expiry(&mut self, pin_expiry: u32) -> Result<&mut Self, ValidationError> {
        if !(60..=3600).contains(&pin_expiry) {
            return Err(ValidationError::invalid(
                "pin_expiry",
                "Pin expiration must be between 60 and 3600 seconds",
            ));
        }
        self.pin_expiry = pin_expiry;
        Ok(self)
    }

    /// Returns the wait before the next delivery attempt, in seconds.
    #[must_use]
    pub const fn next_event_wait(&self) -> u32 {
        self.next_event_wait
    }

    /// Sets the wait before the next delivery attempt, in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] unless `next_event_wait` is within 60..=900.
    pub fn set_next_event_wait(
        &mut self,
        next_event_wait: u32,
    ) -> Result<&mut Self, ValidationError> {
        if !(60..=900).contains(&next_event_wait) {
            return Err(ValidationError::invalid(
                "next_event_wait",
                "Next Event time must be between 60 and 900 seconds",
            ));
        }
        self.next_event_wait = next_event_wait;
        Ok(self)
    }

    /// Returns the delivery workflow.
    #[must_use]
    pub const fn workflow_id(&self) -> u32 {
        self.workflow_id
    }

    /// Sets the delivery workflow.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] unless `workflow_id` is within 1..=7.
    pub fn set_workflow_id(&mut self, workflow_id: u32) -> Result<&mut Self, ValidationError> {
        if !(Self::WORKFLOW_SMS_TTS_TTS..=Self::WORKFLOW_TTS).contains(&workflow_id) {
            return Err(ValidationError::invalid(
                "workflow_id",
                "Workflow ID must be from 1 to 7",
            ));
        }
        self.workflow_id = workflow_id;
        Ok(self)
    }

    /// Applies recognized keys from a raw payload through the validating
    /// setters. Unrecognized keys are ignored.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::MalformedPayload`] if a key has the wrong JSON type
    /// - [`VerifyError::Validation`] for the first value a setter rejects
    pub fn hydrate(&mut self, data: &Value) -> Result<(), VerifyError> {
        let raw = RawVerifyRequest::deserialize(data)?;

        if let Some(sender_id) = raw.sender_id {
            self.set_sender_id(sender_id);
        }
        if let Some(code_length) = raw.code_length {
            self.set_code_length(code_length)?;
        }
        if let Some(pin_expiry) = raw.pin_expiry {
            self.set_pin_expiry(pin_expiry)?;
        }
        if let Some(next_event_wait) = raw.next_event_wait {
            self.set_next_event_wait(next_event_wait)?;
        }
        if let Some(workflow_id) = raw.workflow_id {
            self.set_workflow_id(workflow_id)?;
        }
        if let Some(country) = raw.country {
            self.set_country(country)?;
        }
        if let Some(locale) = raw.lg {
            self.set_locale(locale);
        }

        Ok(())
    }
}
