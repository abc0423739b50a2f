use crate::{
    BoxError, FaultReceiver, HostExit, HostedService, LifecycleController, LifecycleError,
    LifecycleResult, LifecycleSettings, RecoveryAction, RecoveryPolicy, ServiceFault,
    ServiceIdentity, Supervisor, SupervisorTimeouts,
};

use std::fmt;
use std::future::Future;
use std::panic::Location;
use std::pin::Pin;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{error, info, warn};

/// Adapter the process supervisor talks to.
///
/// Translates supervisor hooks into controller calls and reports the
/// outcome back through [`Supervisor`]. [`HostShell::run`] drives the
/// hooks for a whole process lifetime.
pub struct HostShell<S: HostedService> {
    controller: Arc<LifecycleController<S>>,
    supervisor: Arc<dyn Supervisor>,
    faults: FaultReceiver,
}

impl<S: HostedService> HostShell<S> {
    pub fn new(
        identity: ServiceIdentity,
        settings: LifecycleSettings,
        policy: RecoveryPolicy,
        service: S,
        supervisor: Arc<dyn Supervisor>,
        faults: FaultReceiver,
    ) -> Self {
        let extender = Arc::new(SupervisorTimeouts::new(Arc::clone(&supervisor)));
        let controller = Arc::new(LifecycleController::new(
            identity, settings, policy, service, extender,
        ));

        Self {
            controller,
            supervisor,
            faults,
        }
    }

    pub fn controller(&self) -> &Arc<LifecycleController<S>> {
        &self.controller
    }

    /// Supervisor asked the service to start.
    pub async fn on_supervisor_start(&self) -> LifecycleResult<()> {
        match self.controller.start().await {
            Ok(()) => {
                self.supervisor.notify_status("running");
                self.supervisor.notify_ready();
                Ok(())
            }
            Err(e) => {
                error!("Failed to start {}: {e}", self.name());
                self.supervisor.notify_status(&format!("start failed: {e}"));
                Err(e)
            }
        }
    }

    /// Supervisor asked the service to stop.
    ///
    /// Owned resources are released on every path, including failures.
    pub async fn on_supervisor_stop(&self) -> LifecycleResult<()> {
        self.supervisor.notify_stopping();

        let result = self.controller.stop().await;
        if let Err(ref e) = result {
            error!("Failed to stop {}: {e}", self.name());
            self.supervisor.notify_status(&format!("stop failed: {e}"));
        }

        self.release();
        result
    }

    /// The running service crashed outside an explicit stop.
    ///
    /// Returns [`LifecycleError::RecoveryExhausted`] once the restart
    /// schedule gives up; logs are flushed before returning it.
    #[track_caller]
    pub fn on_unhandled_error(&self, error: impl fmt::Display) -> LifecycleResult<RecoveryAction> {
        match self.controller.on_unexpected_termination(error)? {
            RecoveryAction::GiveUp => {
                let e = LifecycleError::RecoveryExhausted {
                    failures: self.controller.attempt().failure_count,
                    location: ErrorLocation::from(Location::caller()),
                };
                error!("{e}");
                self.supervisor.notify_status("recovery exhausted");
                self.release();
                Err(e)
            }
            action => Ok(action),
        }
    }

    /// Run the service until `shutdown` resolves or recovery gives up.
    pub async fn run<F>(mut self, shutdown: F) -> HostExit
    where
        F: Future<Output = ()>,
    {
        if self.on_supervisor_start().await.is_err() {
            self.release();
            return HostExit::StartFailed;
        }

        tokio::pin!(shutdown);

        loop {
            let fault = tokio::select! {
                _ = &mut shutdown => break,
                fault = self.faults.recv() => fault,
            };

            let Some(fault) = fault else {
                // No reporters left; only the supervisor can end the run now
                shutdown.as_mut().await;
                break;
            };

            if let Some(exit) = self.recover(fault, &mut shutdown).await {
                return exit;
            }
        }

        info!("Shutdown requested for {}", self.name());
        match self.on_supervisor_stop().await {
            Ok(()) => HostExit::Clean,
            Err(_) => HostExit::StopFailed,
        }
    }

    /// Walk the restart schedule for one fault. `Some` ends the run.
    async fn recover<F>(
        &self,
        fault: ServiceFault,
        shutdown: &mut Pin<&mut F>,
    ) -> Option<HostExit>
    where
        F: Future<Output = ()>,
    {
        let mut cause: BoxError = fault.error;

        loop {
            let delay = match self.on_unhandled_error(&cause) {
                Ok(RecoveryAction::RestartAfter(delay)) => delay,
                Ok(RecoveryAction::GiveUp) => return Some(HostExit::RecoveryExhausted),
                Err(e) if e.is_invalid_transition() => {
                    warn!("Ignoring fault while {}: {cause}", self.controller.state());
                    return None;
                }
                Err(_) => return Some(HostExit::RecoveryExhausted),
            };

            let restart = self.controller.restart_after(delay);
            tokio::pin!(restart);

            let outcome = tokio::select! {
                outcome = &mut restart => outcome,
                _ = shutdown.as_mut() => {
                    info!("Shutdown requested during restart of {}", self.name());
                    let (_, stopped) = tokio::join!(restart, self.on_supervisor_stop());
                    return Some(match stopped {
                        Ok(()) => HostExit::Clean,
                        Err(_) => HostExit::StopFailed,
                    });
                }
            };

            match outcome {
                Ok(()) => {
                    self.supervisor.notify_status("running");
                    return None;
                }
                Err(e) if e.is_invalid_transition() => {
                    warn!("Restart of {} abandoned: {e}", self.name());
                    return None;
                }
                // A failed restart counts as the next consecutive failure
                Err(e) => cause = Box::new(e),
            }
        }
    }

    fn name(&self) -> &str {
        self.controller.identity().name()
    }

    fn release(&self) {
        log::logger().flush();
    }
}
