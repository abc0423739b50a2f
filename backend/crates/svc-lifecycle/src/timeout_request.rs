use std::fmt;
use std::time::Duration;

/// Lifecycle phase that can ask the supervisor for more time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServicePhase {
    Starting,
    Stopping,
}

impl fmt::Display for ServicePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Starting => "start",
            Self::Stopping => "stop",
        })
    }
}

/// Request for `extra` time before the supervisor treats `phase` as hung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutRequest {
    pub phase: ServicePhase,
    pub extra: Duration,
}

/// Receives the controller's timeout requests.
///
/// Implementations must not block; the controller calls this from inside
/// its start/stop transitions.
pub trait TimeoutExtender: Send + Sync {
    fn request_additional_time(&self, request: TimeoutRequest);
}
