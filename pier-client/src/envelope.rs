//! Envelope decoding
//!
//! Responses arrive as `{code, msg, payload}`. Some backend handlers emit
//! PascalCase members, so the envelope, its payload and each list item are
//! key-normalized before the typed decode.

use pier_core::dto::response::Envelope;
use pier_core::normalize::transform_camel_case;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{ClientError, Result};

/// Normalize the first letter of keys at the envelope, payload and item levels
pub fn normalize_envelope(value: Value) -> Value {
    let mut envelope = transform_camel_case(value);
    if let Some(payload) = envelope.get_mut("payload") {
        let mut normalized = transform_camel_case(payload.take());
        if let Some(Value::Array(items)) = normalized.get_mut("items") {
            for item in items.iter_mut() {
                *item = transform_camel_case(item.take());
            }
        }
        *payload = normalized;
    }
    envelope
}

/// Decode a response body into its envelope
pub fn decode_envelope<T: DeserializeOwned>(body: Value) -> Result<Envelope<T>> {
    serde_json::from_value(normalize_envelope(body)).map_err(|e| {
        warn!(error = %e, "Response did not match the expected envelope");
        ClientError::ParseError(format!("Invalid response envelope: {}", e))
    })
}

/// Decode a response body and return its payload
///
/// A non-zero `code` becomes [`ClientError::Rejected`].
pub fn unwrap_payload<T: DeserializeOwned>(body: Value) -> Result<T> {
    let envelope: Envelope<T> = decode_envelope(body)?;

    if !envelope.is_success() {
        return Err(ClientError::Rejected {
            code: envelope.code,
            message: envelope.msg,
        });
    }

    envelope
        .payload
        .ok_or_else(|| ClientError::ParseError("Response envelope has no payload".to_string()))
}
