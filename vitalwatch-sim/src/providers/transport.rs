//! Alert transport that writes payloads to the log

use tracing::info;

use vitalwatch_core::traits::{AlertTransport, TransportError};

/// Logs each payload against its endpoint instead of sending it
#[derive(Debug, Clone)]
pub struct LogTransport {
    endpoint: String,
    /// Payloads logged so far
    sent: usize,
}

impl LogTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            sent: 0,
        }
    }
}

impl AlertTransport for LogTransport {
    async fn send(&mut self, body: &[u8]) -> Result<(), TransportError> {
        let json = String::from_utf8_lossy(body);
        self.sent += 1;
        info!(endpoint = %self.endpoint, n = self.sent, payload = %json, "alert payload");
        Ok(())
    }
}
