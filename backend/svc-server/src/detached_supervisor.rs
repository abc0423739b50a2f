use svc_lifecycle::Supervisor;

use std::time::Duration;

use log::debug;

/// Supervisor stand-in for console runs and platforms without a notify
/// protocol. Every notification is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSupervisor;

impl Supervisor for DetachedSupervisor {
    fn notify_ready(&self) {
        debug!("Ready (no supervisor attached)");
    }

    fn notify_stopping(&self) {}

    fn extend_timeout(&self, _extra: Duration) {}

    fn notify_status(&self, status: &str) {
        debug!("Status: {status}");
    }
}
