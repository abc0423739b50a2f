use crate::ServiceState;

use metrics::{counter, gauge};

/// Metrics collector for lifecycle transitions
#[derive(Clone)]
pub struct LifecycleMetrics {
    prefix: &'static str,
}

impl LifecycleMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "svc_lifecycle",
        }
    }

    /// Record a state change
    pub fn state_changed(&self, state: ServiceState) {
        counter!(format!("{}.transitions.{}", self.prefix, state)).increment(1);
        gauge!(format!("{}.state", self.prefix)).set(state.code());
    }

    /// Record a failed start or stop callback
    pub fn callback_failed(&self, phase: &str) {
        counter!(format!("{}.callback_failures.{}", self.prefix, phase)).increment(1);
    }

    /// Record an extra-time request sent to the supervisor
    pub fn timeout_extended(&self, phase: &str) {
        counter!(format!("{}.timeout_extensions.{}", self.prefix, phase)).increment(1);
    }

    /// Record an unexpected termination and the consecutive count it reached
    pub fn crashed(&self, failure_count: u32) {
        counter!(format!("{}.crashes", self.prefix)).increment(1);
        gauge!(format!("{}.consecutive_failures", self.prefix)).set(failure_count as f64);
    }

    pub fn restarted(&self) {
        counter!(format!("{}.restarts", self.prefix)).increment(1);
    }

    pub fn gave_up(&self) {
        counter!(format!("{}.recovery_exhausted", self.prefix)).increment(1);
    }
}

impl Default for LifecycleMetrics {
    fn default() -> Self {
        Self::new()
    }
}
