//! Translation of raw gateway exchanges into [`SendOutcome`]s and [`ErrorRecord`]s.

use log::{debug, warn};

use crate::domain::{ErrorCode, ErrorList, ErrorRecord, RawResponse, SendOutcome, SendResult};
use crate::transport::{TransportError, decode_message_json_response};

/// Interpret `raw` and record the failure reason in `errors` when there is one.
///
/// Only `message.status == 0` yields [`SendOutcome::Sent`]. Every other shape
/// appends exactly one [`ErrorRecord`] and yields [`SendOutcome::Failed`].
pub(crate) fn map_response(raw: &RawResponse, errors: &mut ErrorList) -> SendOutcome {
    let (status, body) = match raw {
        RawResponse::Failed { kind, message } => {
            return fail(errors, ErrorCode::Transport(*kind), message.clone());
        }
        RawResponse::Received { status, body } => (*status, body),
    };

    if !(200..=299).contains(&status) {
        let message = if body.trim().is_empty() {
            format!("unexpected HTTP status: {status}")
        } else {
            body.trim().to_owned()
        };
        return fail(errors, ErrorCode::Http(status), message);
    }

    let decoded = match decode_message_json_response(body) {
        Ok(decoded) => decoded,
        Err(err) => return fail(errors, ErrorCode::MalformedResponse, malformed_message(&err)),
    };

    if decoded.status.is_success() {
        debug!(
            "[Zenziva] message accepted: id={:?} balance={:?}",
            decoded.message_id, decoded.balance
        );
        return SendOutcome::Sent(SendResult {
            id: decoded.message_id.unwrap_or_default(),
            status: decoded.status,
            message: decoded.text.unwrap_or_default(),
            balance: decoded.balance.unwrap_or_default(),
        });
    }

    let message = decoded
        .text
        .or_else(|| decoded.status.description().map(str::to_owned))
        .unwrap_or_else(|| format!("unknown status {}", decoded.status));
    fail(errors, ErrorCode::Provider(decoded.status), message)
}

fn fail(errors: &mut ErrorList, code: ErrorCode, message: String) -> SendOutcome {
    let record = ErrorRecord::new(code, message);
    warn!("[Zenziva] request failed: {record}");
    errors.push(record);
    SendOutcome::Failed
}

fn malformed_message(err: &TransportError) -> String {
    format!("malformed response: {err}")
}
