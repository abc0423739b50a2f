use crate::BoxError;

use std::fmt;

use tokio::sync::mpsc;

/// Crash of a background worker, reported outside any start/stop call.
#[derive(Debug)]
pub struct ServiceFault {
    pub error: BoxError,
}

impl fmt::Display for ServiceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

/// Handed to the hosted service so its workers can report crashes.
#[derive(Debug, Clone)]
pub struct FaultReporter {
    tx: mpsc::UnboundedSender<ServiceFault>,
}

impl FaultReporter {
    /// Report a crash. Never blocks; dropped silently once the host is gone.
    pub fn report(&self, error: impl Into<BoxError>) {
        let fault = ServiceFault {
            error: error.into(),
        };
        if self.tx.send(fault).is_err() {
            log::debug!("Fault reported after host shut down");
        }
    }
}

/// Host side of the fault channel.
#[derive(Debug)]
pub struct FaultReceiver {
    rx: mpsc::UnboundedReceiver<ServiceFault>,
}

impl FaultReceiver {
    /// Next reported fault; `None` once every reporter is dropped.
    pub async fn recv(&mut self) -> Option<ServiceFault> {
        self.rx.recv().await
    }
}

pub fn fault_channel() -> (FaultReporter, FaultReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (FaultReporter { tx }, FaultReceiver { rx })
}
