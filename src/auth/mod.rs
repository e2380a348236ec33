//! Authentication state for the Nexmo API SDK.
//!
//! Requests are authorized with the account's API key and secret, sent as
//! HTTP basic credentials by the transport. The [`Session`] bundles those
//! credentials with the transport so resource clients can share one instance.
//!
//! Request signing with a signature secret and JWT generation from an
//! application's private key are handled outside this crate.

pub mod session;

pub use session::Session;
