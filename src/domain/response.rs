use std::fmt;

use crate::domain::value::StatusCode;

/// Accepted message as reported by Zenziva (`message.status == 0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResult {
    pub id: String,
    pub status: StatusCode,
    pub message: String,
    pub balance: String,
}

/// Result of a send call that passed validation and reached the gateway.
///
/// `Failed` carries no payload: the reason is appended to the client's
/// [`ErrorList`] before the call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent(SendResult),
    Failed,
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    /// Borrow the result when the message was accepted.
    pub fn result(&self) -> Option<&SendResult> {
        match self {
            Self::Sent(result) => Some(result),
            Self::Failed => None,
        }
    }

    pub fn into_result(self) -> Option<SendResult> {
        match self {
            Self::Sent(result) => Some(result),
            Self::Failed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Category of a failure reported by the HTTP transport.
pub enum TransportErrorKind {
    /// Connection could not be established (including the connect timeout).
    Connect,
    /// The request or response exceeded a timeout.
    Timeout,
    /// Reading the response body failed.
    Body,
    /// Any other request failure.
    Request,
}

impl TransportErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Body => "body",
            Self::Request => "request",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Code attached to an [`ErrorRecord`].
///
/// Provider and HTTP codes are numeric; the remaining variants render as short
/// textual codes.
pub enum ErrorCode {
    /// Non-zero `message.status` returned by Zenziva.
    Provider(StatusCode),
    /// Non-successful HTTP status.
    Http(u16),
    /// The request never produced an HTTP response.
    Transport(TransportErrorKind),
    /// The body was not JSON or had no `message.status`.
    MalformedResponse,
}

impl ErrorCode {
    /// Provider status code, when the gateway itself rejected the request.
    pub fn status_code(self) -> Option<StatusCode> {
        match self {
            Self::Provider(code) => Some(code),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(code) => write!(f, "{code}"),
            Self::Http(status) => write!(f, "{status}"),
            Self::Transport(kind) => write!(f, "{kind}"),
            Self::MalformedResponse => f.write_str("malformed_response"),
        }
    }
}

/// One recorded failure of a request that reached (or tried to reach) the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Status table description for provider rejections with a known code.
    pub fn description(&self) -> Option<&'static str> {
        self.code.status_code().and_then(StatusCode::description)
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Ordered collection of [`ErrorRecord`]s.
///
/// Records accumulate across calls; nothing is removed until [`ErrorList::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList {
    records: Vec<ErrorRecord>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ErrorRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn last(&self) -> Option<&ErrorRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a ErrorRecord;
    type IntoIter = std::slice::Iter<'a, ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Last raw exchange with the gateway, kept for introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse {
    /// An HTTP response was received (any status).
    Received { status: u16, body: String },
    /// The transport failed before a response was available.
    Failed {
        kind: TransportErrorKind,
        message: String,
    },
}

impl RawResponse {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Received { status, .. } => Some(*status),
            Self::Failed { .. } => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Received { body, .. } => Some(body.as_str()),
            Self::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_list_accumulates_until_cleared() {
        let mut errors = ErrorList::new();
        assert!(errors.is_empty());

        errors.push(ErrorRecord::new(
            ErrorCode::Provider(StatusCode::new(1)),
            "Nomor tujuan tidak valid",
        ));
        errors.push(ErrorRecord::new(
            ErrorCode::Transport(TransportErrorKind::Timeout),
            "operation timed out",
        ));

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.last().map(|record| record.code),
            Some(ErrorCode::Transport(TransportErrorKind::Timeout))
        );
        assert_eq!((&errors).into_iter().count(), 2);

        errors.clear();
        assert!(errors.is_empty());
        assert!(errors.last().is_none());
    }

    #[test]
    fn error_codes_render_numeric_or_textual() {
        assert_eq!(ErrorCode::Provider(StatusCode::new(89)).to_string(), "89");
        assert_eq!(ErrorCode::Http(502).to_string(), "502");
        assert_eq!(
            ErrorCode::Transport(TransportErrorKind::Connect).to_string(),
            "connect"
        );
        assert_eq!(
            ErrorCode::MalformedResponse.to_string(),
            "malformed_response"
        );
    }

    #[test]
    fn error_record_description_uses_status_table() {
        let known = ErrorRecord::new(ErrorCode::Provider(StatusCode::new(99)), "saldo habis");
        assert_eq!(known.description(), Some("Credit tidak mencukupi"));
        assert_eq!(known.to_string(), "[99] saldo habis");

        let unknown = ErrorRecord::new(ErrorCode::Provider(StatusCode::new(7)), "???");
        assert_eq!(unknown.description(), None);

        let http = ErrorRecord::new(ErrorCode::Http(500), "oops");
        assert_eq!(http.description(), None);
    }

    #[test]
    fn send_outcome_accessors() {
        let sent = SendOutcome::Sent(SendResult {
            id: "X1".to_owned(),
            status: StatusCode::new(0),
            message: "OK".to_owned(),
            balance: "1000".to_owned(),
        });
        assert!(sent.is_sent());
        assert_eq!(sent.result().map(|r| r.id.as_str()), Some("X1"));

        assert!(!SendOutcome::Failed.is_sent());
        assert!(SendOutcome::Failed.into_result().is_none());
    }

    #[test]
    fn raw_response_accessors() {
        let received = RawResponse::Received {
            status: 200,
            body: "{}".to_owned(),
        };
        assert_eq!(received.status(), Some(200));
        assert_eq!(received.body(), Some("{}"));

        let failed = RawResponse::Failed {
            kind: TransportErrorKind::Connect,
            message: "refused".to_owned(),
        };
        assert_eq!(failed.status(), None);
        assert_eq!(failed.body(), None);
    }
}
