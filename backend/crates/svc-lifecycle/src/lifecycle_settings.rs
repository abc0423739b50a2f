use std::time::Duration;

const DEFAULT_GRACE_SECS: u64 = 60;
const DEFAULT_TIMEOUT_EXTENSIONS: u32 = 1;

/// Timing the controller applies to start/stop callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleSettings {
    /// Time requested for, and allowed to, the start callback
    pub start_grace: Duration,
    /// Time requested for, and allowed to, the stop callback
    pub stop_grace: Duration,
    /// Further grace periods requested when a callback overruns
    pub timeout_extensions: u32,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            start_grace: Duration::from_secs(DEFAULT_GRACE_SECS),
            stop_grace: Duration::from_secs(DEFAULT_GRACE_SECS),
            timeout_extensions: DEFAULT_TIMEOUT_EXTENSIONS,
        }
    }
}
