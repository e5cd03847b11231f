//! Alert transport trait

use core::fmt;

/// Errors that can occur sending an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Endpoint could not be reached
    Unreachable,
    /// Endpoint answered with a non-success status
    Rejected(u16),
    /// Send did not complete in time
    Timeout,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Unreachable => f.write_str("alert endpoint unreachable"),
            TransportError::Rejected(code) => write!(f, "alert endpoint returned status {}", code),
            TransportError::Timeout => f.write_str("alert send timed out"),
        }
    }
}

/// Outbound channel for encoded alert payloads
///
/// Fire-and-forget from the engine's point of view: the result is only
/// logged.
#[allow(async_fn_in_trait)]
pub trait AlertTransport {
    /// Send an encoded payload
    async fn send(&mut self, body: &[u8]) -> Result<(), TransportError>;
}
