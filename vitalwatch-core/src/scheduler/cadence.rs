//! Fixed-period cadence

/// A fixed-period deadline tracker
///
/// Missed periods are skipped rather than replayed: a cadence polled late
/// fires once and schedules its next deadline one period after `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    period_ms: u64,
    next_due_ms: u64,
}

impl Cadence {
    /// Create a cadence first due one period after `start_ms`
    pub fn every(period_ms: u32, start_ms: u64) -> Self {
        let period_ms = period_ms.max(1) as u64;
        Self {
            period_ms,
            next_due_ms: start_ms.saturating_add(period_ms),
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_due_ms
    }

    /// Fire if due, then schedule the next deadline
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        self.next_due_ms = self.next_due_ms.saturating_add(self.period_ms);
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms.saturating_add(self.period_ms);
        }
        true
    }
}
