//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{SEND_OTP_PATH, SEND_SMS_PATH, SendOtp, SendSms};
pub use response::{
    ErrorCode, ErrorList, ErrorRecord, RawResponse, SendOutcome, SendResult, TransportErrorKind,
};
pub use validation::ValidationError;
pub use value::{KnownStatusCode, MessageText, Msisdn, OtpCode, STATUS_CODES, StatusCode};
