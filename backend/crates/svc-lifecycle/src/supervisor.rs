use crate::{TimeoutExtender, TimeoutRequest};

use std::sync::Arc;
use std::time::Duration;

use log::debug;

/// The process supervisor as seen from inside the service.
///
/// Every call is a fire-and-forget notification. Platforms without a
/// matching concept implement them as no-ops.
pub trait Supervisor: Send + Sync {
    /// The service finished starting
    fn notify_ready(&self);

    /// The service began shutting down
    fn notify_stopping(&self);

    /// Ask for `extra` time before the current phase is considered hung
    fn extend_timeout(&self, extra: Duration);

    /// Free-form status line
    fn notify_status(&self, status: &str);
}

/// Forwards controller timeout requests to the supervisor's
/// "request additional time" primitive.
#[derive(Clone)]
pub struct SupervisorTimeouts {
    supervisor: Arc<dyn Supervisor>,
}

impl SupervisorTimeouts {
    pub fn new(supervisor: Arc<dyn Supervisor>) -> Self {
        Self { supervisor }
    }
}

impl TimeoutExtender for SupervisorTimeouts {
    fn request_additional_time(&self, request: TimeoutRequest) {
        debug!(
            "Requesting {:?} additional {} time from supervisor",
            request.extra, request.phase
        );
        self.supervisor.extend_timeout(request.extra);
    }
}
