//! JSON encoding of alert payloads

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::payload::AlertPayload;

/// Errors that can occur encoding or decoding a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Payload could not be serialized
    Serialize,
    /// Bytes are not a valid payload
    Deserialize,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Serialize => f.write_str("failed to serialize alert payload"),
            EncodeError::Deserialize => f.write_str("invalid alert payload"),
        }
    }
}

/// Event identifier for a dispatch at `epoch_ms`
pub fn event_id(epoch_ms: u64) -> String {
    format!("EVT-{}", epoch_ms)
}

/// Encode a payload as a compact JSON body
pub fn encode(payload: &AlertPayload) -> Result<Vec<u8>, EncodeError> {
    serde_json::to_vec(payload).map_err(|_| EncodeError::Serialize)
}

/// Decode a JSON body
pub fn decode(bytes: &[u8]) -> Result<AlertPayload, EncodeError> {
    serde_json::from_slice(bytes).map_err(|_| EncodeError::Deserialize)
}
