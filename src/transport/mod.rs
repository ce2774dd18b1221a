//! Transport layer: wire-format details (query encoding, JSON decoding).

mod message;
mod scalar;

pub use message::{
    TransportError, decode_message_json_response, encode_send_otp_query, encode_send_sms_query,
};
