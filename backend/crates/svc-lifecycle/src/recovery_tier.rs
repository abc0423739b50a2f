use std::time::Duration;

/// Restart delay that applies from the `after_failures`-th consecutive
/// failure on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryTier {
    pub after_failures: u32,
    pub delay: Duration,
}

impl RecoveryTier {
    pub fn new(after_failures: u32, delay: Duration) -> Self {
        Self {
            after_failures,
            delay,
        }
    }
}
