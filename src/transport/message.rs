use serde::Deserialize;

use crate::domain::{MessageText, Msisdn, OtpCode, SendOtp, SendSms, StatusCode};
use crate::transport::scalar::TransportScalar;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no message.status field")]
    MissingStatus,

    #[error("message.status is not an integer: {raw}")]
    InvalidStatus { raw: String },
}

#[derive(Debug, Clone, Deserialize)]
struct MessageEnvelope {
    #[serde(default)]
    message: Option<MessageJson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageJson {
    #[serde(default)]
    status: Option<TransportScalar>,
    #[serde(default)]
    message_id: Option<TransportScalar>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    balance: Option<TransportScalar>,
}

/// Decoded `message` object of a Zenziva JSON response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    pub status: StatusCode,
    pub message_id: Option<String>,
    pub text: Option<String>,
    pub balance: Option<String>,
}

pub fn encode_send_sms_query(request: &SendSms) -> Vec<(String, String)> {
    vec![
        (Msisdn::FIELD.to_owned(), request.msisdn().as_str().to_owned()),
        (MessageText::FIELD.to_owned(), request.text().as_str().to_owned()),
    ]
}

pub fn encode_send_otp_query(request: &SendOtp) -> Vec<(String, String)> {
    vec![
        (Msisdn::FIELD.to_owned(), request.msisdn().as_str().to_owned()),
        (OtpCode::FIELD.to_owned(), request.code().as_str().to_owned()),
    ]
}

pub fn decode_message_json_response(json: &str) -> Result<DecodedMessage, TransportError> {
    let parsed: MessageEnvelope = serde_json::from_str(json)?;
    let message = parsed.message.ok_or(TransportError::MissingStatus)?;
    let raw_status = message.status.ok_or(TransportError::MissingStatus)?;

    let status = raw_status
        .as_str()
        .trim()
        .parse::<i32>()
        .map_err(|_| TransportError::InvalidStatus {
            raw: raw_status.as_str().to_owned(),
        })?;

    Ok(DecodedMessage {
        status: StatusCode::new(status),
        message_id: message.message_id.map(TransportScalar::into_string),
        text: message.text,
        balance: message.balance.map(TransportScalar::into_string),
    })
}
