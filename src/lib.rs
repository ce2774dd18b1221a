//! Typed Rust client for the Zenziva SMS gateway HTTP API.
//!
//! The crate is split into a domain layer of strong types (phone number
//! normalization, OTP codes, the gateway status table), a transport layer for
//! wire-format details, and a small client layer orchestrating requests.
//!
//! Validation and configuration problems are returned as [`ZenzivaError`].
//! Failures on the gateway side (network errors, rejected messages, malformed
//! responses) are recorded on the client and the call yields
//! [`SendOutcome::Failed`], so callers check both the outcome and
//! [`ZenzivaClient::errors`].
//!
//! ```rust,no_run
//! use zenziva::{Config, SendOutcome, ZenzivaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zenziva::ZenzivaError> {
//!     let mut client = ZenzivaClient::new(Config::with_credentials("userkey", "passkey"))?;
//!     match client.send("+6281234567890", "hello").await? {
//!         SendOutcome::Sent(result) => println!("sent {}", result.id),
//!         SendOutcome::Failed => eprintln!("failed: {:?}", client.last_error()),
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxFuture, Config, ConfigError, HttpResponse, HttpTransport, TransportFailure, ZenzivaClient,
    ZenzivaClientBuilder, ZenzivaError,
};
pub use domain::{
    ErrorCode, ErrorList, ErrorRecord, KnownStatusCode, MessageText, Msisdn, OtpCode, RawResponse,
    STATUS_CODES, SendOtp, SendOutcome, SendResult, SendSms, StatusCode, TransportErrorKind,
    ValidationError,
};
