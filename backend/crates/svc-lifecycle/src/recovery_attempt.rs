use std::time::Instant;

/// Consecutive failures counted inside the current reset window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryAttempt {
    pub failure_count: u32,
    pub window_start: Instant,
}

impl RecoveryAttempt {
    /// A fresh window opening at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            failure_count: 0,
            window_start: now,
        }
    }
}
