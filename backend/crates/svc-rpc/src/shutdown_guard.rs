use crate::ShutdownCoordinator;

use tokio::sync::watch;

/// Helper for awaiting shutdown inside spawned tasks
pub struct ShutdownGuard {
    shutdown_rx: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
        }
    }

    /// Wait for shutdown signal
    pub async fn wait(&mut self) {
        // Err means the coordinator is gone, which also ends the run
        let _ = self.shutdown_rx.wait_for(|requested| *requested).await;
    }
}
