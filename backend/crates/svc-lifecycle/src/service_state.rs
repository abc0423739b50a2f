use std::fmt;

/// Current state of the hosted service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceState {
    /// Not running; the only state `start()` is accepted from
    Stopped,
    /// Start callback in flight, or a restart is queued
    Starting,
    /// Start callback returned successfully
    Running,
    /// Stop callback in flight
    Stopping,
    /// A callback failed or the service crashed
    Failed,
}

impl ServiceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Failed => "failed",
        }
    }

    /// Numeric code published on the state gauge.
    pub(crate) fn code(&self) -> f64 {
        match self {
            Self::Stopped => 0.0,
            Self::Starting => 1.0,
            Self::Running => 2.0,
            Self::Stopping => 3.0,
            Self::Failed => 4.0,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
