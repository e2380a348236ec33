//! Phone number verification.
//!
//! [`VerifyRequest`] holds the parameters of a verification and validates
//! each one as it is set. [`VerifyClient`] sends it to the platform.
//!
//! # Example
//!
//! ```rust
//! use nexmo_api::verify::VerifyRequest;
//! use serde_json::json;
//!
//! let mut request = VerifyRequest::new("14845551212", "Acme", VerifyRequest::WORKFLOW_SMS).unwrap();
//! request.hydrate(&json!({"code_length": 6, "lg": "en-us"})).unwrap();
//!
//! assert_eq!(request.code_length(), 6);
//! assert!(request.set_country("United States").is_err());
//! ```

mod client;
mod errors;
mod request;

pub use client::{VerifyClient, VerifyStarted};
pub use errors::VerifyError;
pub use request::VerifyRequest;
