use crate::{
    BoxError, FailureCause, HostedService, LifecycleError, LifecycleMetrics, LifecycleResult,
    LifecycleSettings, RecoveryAction, RecoveryAttempt, RecoveryPolicy, ServiceIdentity,
    ServicePhase, ServiceState, TimeoutExtender, TimeoutRequest, Transition,
};

use std::fmt;
use std::future::Future;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use tokio::sync::{Mutex, watch};

/// Outcome of inspecting the current state for a stop request.
enum StopPlan {
    AlreadyStopped,
    AwaitStart,
    Proceed,
    Reject(ServiceState),
}

/// Drives the hosted service through its lifecycle.
///
/// ```text
/// Stopped --start()--> Starting --ok--> Running --stop()--> Stopping --ok--> Stopped
///                         |                |                    |
///                       error            crash                error
///                         v                v                    v
///                       Failed <--GiveUp-- recovery --RestartAfter--> Starting
/// ```
///
/// Only one transition runs at a time. Claims on the state are made
/// atomically through the watch channel, so a second `start()` while
/// anything is in flight fails fast instead of queuing.
pub struct LifecycleController<S: HostedService> {
    identity: ServiceIdentity,
    settings: LifecycleSettings,
    policy: RecoveryPolicy,
    service: Mutex<S>,
    extender: Arc<dyn TimeoutExtender>,
    state_tx: watch::Sender<ServiceState>,
    attempt: std::sync::Mutex<RecoveryAttempt>,
    /// Set while `Starting` means "restart waiting for its delay", not
    /// "start callback running"
    restart_queued: AtomicBool,
    metrics: LifecycleMetrics,
}

impl<S: HostedService> LifecycleController<S> {
    pub fn new(
        identity: ServiceIdentity,
        settings: LifecycleSettings,
        policy: RecoveryPolicy,
        service: S,
        extender: Arc<dyn TimeoutExtender>,
    ) -> Self {
        let (state_tx, _) = watch::channel(ServiceState::Stopped);

        Self {
            identity,
            settings,
            policy,
            service: Mutex::new(service),
            extender,
            state_tx,
            attempt: std::sync::Mutex::new(RecoveryAttempt::new(Instant::now())),
            restart_queued: AtomicBool::new(false),
            metrics: LifecycleMetrics::new(),
        }
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    pub fn state(&self) -> ServiceState {
        *self.state_tx.borrow()
    }

    /// Receiver observing every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<ServiceState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the consecutive-failure counter.
    pub fn attempt(&self) -> RecoveryAttempt {
        *self.lock_attempt()
    }

    /// Start the service. Valid only from `Stopped`.
    ///
    /// Errors carry the location of the call, not of the await.
    #[track_caller]
    pub fn start(&self) -> impl Future<Output = LifecycleResult<()>> + '_ {
        let caller = Location::caller();
        async move {
            self.claim(
                Transition::Start,
                &[ServiceState::Stopped],
                ServiceState::Starting,
                caller,
            )?;
            self.run_start(caller).await
        }
    }

    /// Stop the service.
    ///
    /// A no-op when already `Stopped`. While a start callback is running,
    /// waits for its outcome and then stops, also when that start failed;
    /// a restart that is only queued is cancelled instead.
    #[track_caller]
    pub fn stop(&self) -> impl Future<Output = LifecycleResult<()>> + '_ {
        let caller = Location::caller();
        async move { self.stop_from(caller).await }
    }

    async fn stop_from(&self, caller: &'static Location<'static>) -> LifecycleResult<()> {
        let mut awaited_start = false;

        loop {
            let mut plan = StopPlan::AlreadyStopped;
            self.state_tx.send_if_modified(|state| {
                plan = match *state {
                    ServiceState::Stopped => StopPlan::AlreadyStopped,
                    ServiceState::Running => StopPlan::Proceed,
                    ServiceState::Starting if self.restart_queued.swap(false, Ordering::SeqCst) => {
                        StopPlan::Proceed
                    }
                    ServiceState::Starting => StopPlan::AwaitStart,
                    // The start this stop waited on failed; release what it acquired
                    ServiceState::Failed if awaited_start => StopPlan::Proceed,
                    other => StopPlan::Reject(other),
                };

                if matches!(plan, StopPlan::Proceed) {
                    *state = ServiceState::Stopping;
                    true
                } else {
                    false
                }
            });

            match plan {
                StopPlan::AlreadyStopped => {
                    debug!("{} already stopped", self.identity.name());
                    return Ok(());
                }
                StopPlan::Proceed => break,
                StopPlan::AwaitStart => {
                    debug!(
                        "Stop requested while {} is starting, waiting for start to finish",
                        self.identity.name()
                    );
                    let mut state_rx = self.state_tx.subscribe();
                    // The sender lives as long as self, so this only returns Ok
                    let _ = state_rx.wait_for(|s| *s != ServiceState::Starting).await;
                    awaited_start = true;
                }
                StopPlan::Reject(from) => {
                    return Err(LifecycleError::InvalidTransition {
                        from,
                        attempted: Transition::Stop,
                        location: ErrorLocation::from(caller),
                    });
                }
            }
        }

        self.metrics.state_changed(ServiceState::Stopping);
        self.run_stop(caller).await
    }

    /// Apply the recovery policy to a crash that happened outside `stop()`.
    ///
    /// Valid from `Running` or `Failed`. `GiveUp` leaves the service
    /// `Failed`; `RestartAfter` moves it to `Starting` with the restart
    /// queued until [`Self::restart_after`] runs it.
    #[track_caller]
    pub fn on_unexpected_termination(
        &self,
        error: impl fmt::Display,
    ) -> LifecycleResult<RecoveryAction> {
        let mut outcome = Err(ServiceState::Stopped);

        self.state_tx.send_if_modified(|state| {
            if !matches!(*state, ServiceState::Running | ServiceState::Failed) {
                outcome = Err(*state);
                return false;
            }

            error!("{} terminated unexpectedly: {}", self.identity.name(), error);

            let mut attempt = self.lock_attempt();
            let (action, updated) = self.policy.decide(&attempt, Instant::now());
            *attempt = updated;

            outcome = Ok((action, updated.failure_count));

            let next = match action {
                RecoveryAction::RestartAfter(_) => {
                    self.restart_queued.store(true, Ordering::SeqCst);
                    ServiceState::Starting
                }
                RecoveryAction::GiveUp => ServiceState::Failed,
            };

            let changed = *state != next;
            *state = next;
            changed
        });

        match outcome {
            Ok((action, failures)) => {
                self.metrics.crashed(failures);
                match action {
                    RecoveryAction::RestartAfter(delay) => {
                        warn!(
                            "Restart {} of {} scheduled in {:?}",
                            failures,
                            self.identity.name(),
                            delay
                        );
                        self.metrics.state_changed(ServiceState::Starting);
                    }
                    RecoveryAction::GiveUp => {
                        error!(
                            "Giving up on {} after {} consecutive failures",
                            self.identity.name(),
                            failures
                        );
                        self.metrics.gave_up();
                        self.metrics.state_changed(ServiceState::Failed);
                    }
                }
                Ok(action)
            }
            Err(from) => Err(LifecycleError::InvalidTransition {
                from,
                attempted: Transition::Recover,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Run a restart queued by [`Self::on_unexpected_termination`].
    ///
    /// Waits `delay`, then runs the start callback exactly as `start()`
    /// does. Returns `Ok(())` without starting if a stop cancelled the
    /// restart in the meantime.
    #[track_caller]
    pub fn restart_after(
        &self,
        delay: Duration,
    ) -> impl Future<Output = LifecycleResult<()>> + '_ {
        let caller = Location::caller();
        async move { self.restart_from(delay, caller).await }
    }

    async fn restart_from(
        &self,
        delay: Duration,
        caller: &'static Location<'static>,
    ) -> LifecycleResult<()> {
        if !delay.is_zero() {
            info!("Restarting {} in {:?}", self.identity.name(), delay);
        }

        let mut state_rx = self.state_tx.subscribe();
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = state_rx.wait_for(|s| *s != ServiceState::Starting) => {}
        }

        if !self.restart_queued.swap(false, Ordering::SeqCst) {
            return match self.state() {
                ServiceState::Stopping | ServiceState::Stopped => {
                    info!("Queued restart of {} cancelled by stop", self.identity.name());
                    Ok(())
                }
                from => Err(LifecycleError::InvalidTransition {
                    from,
                    attempted: Transition::Restart,
                    location: ErrorLocation::from(caller),
                }),
            };
        }

        self.metrics.restarted();
        self.run_start(caller).await
    }

    async fn run_start(&self, caller: &'static Location<'static>) -> LifecycleResult<()> {
        let name = self.identity.name();
        info!("Starting {name}");

        let outcome = {
            let mut service = self.service.lock().await;
            self.run_phase(ServicePhase::Starting, self.settings.start_grace, service.start())
                .await
        };

        match outcome {
            Ok(()) => {
                self.set_state(ServiceState::Running);
                info!("{name} started");
                Ok(())
            }
            Err(cause) => {
                error!("{name} failed to start: {cause}");
                self.metrics.callback_failed("start");
                self.set_state(ServiceState::Failed);
                Err(LifecycleError::Start {
                    cause,
                    location: ErrorLocation::from(caller),
                })
            }
        }
    }

    async fn run_stop(&self, caller: &'static Location<'static>) -> LifecycleResult<()> {
        let name = self.identity.name();
        info!("Stopping {name}");

        let outcome = {
            let mut service = self.service.lock().await;
            self.run_phase(ServicePhase::Stopping, self.settings.stop_grace, service.stop())
                .await
        };

        match outcome {
            Ok(()) => {
                *self.lock_attempt() = RecoveryAttempt::new(Instant::now());
                self.set_state(ServiceState::Stopped);
                info!("{name} stopped");
                Ok(())
            }
            Err(cause) => {
                error!("{name} failed to stop: {cause}");
                self.metrics.callback_failed("stop");
                self.set_state(ServiceState::Failed);
                Err(LifecycleError::Stop {
                    cause,
                    location: ErrorLocation::from(caller),
                })
            }
        }
    }

    /// Await a callback within its grace period, asking for more time on
    /// every lapse until the configured extensions run out.
    async fn run_phase<F>(
        &self,
        phase: ServicePhase,
        grace: Duration,
        callback: F,
    ) -> Result<(), FailureCause>
    where
        F: Future<Output = Result<(), BoxError>>,
    {
        tokio::pin!(callback);

        self.extender
            .request_additional_time(TimeoutRequest { phase, extra: grace });

        let mut waited = Duration::ZERO;
        let mut extensions = 0;

        loop {
            match tokio::time::timeout(grace, &mut callback).await {
                Ok(result) => return result.map_err(FailureCause::Callback),
                Err(_) => {
                    waited += grace;

                    if extensions >= self.settings.timeout_extensions {
                        return Err(FailureCause::TimedOut(waited));
                    }

                    extensions += 1;
                    warn!(
                        "{} {phase} still running after {waited:?}, requesting {grace:?} more",
                        self.identity.name()
                    );
                    self.metrics.timeout_extended(&phase.to_string());
                    self.extender
                        .request_additional_time(TimeoutRequest { phase, extra: grace });
                }
            }
        }
    }

    fn claim(
        &self,
        attempted: Transition,
        allowed: &[ServiceState],
        next: ServiceState,
        caller: &'static Location<'static>,
    ) -> LifecycleResult<()> {
        let mut rejected = None;

        self.state_tx.send_if_modified(|state| {
            if allowed.contains(state) {
                *state = next;
                true
            } else {
                rejected = Some(*state);
                false
            }
        });

        match rejected {
            None => {
                self.metrics.state_changed(next);
                Ok(())
            }
            Some(from) => Err(LifecycleError::InvalidTransition {
                from,
                attempted,
                location: ErrorLocation::from(caller),
            }),
        }
    }

    fn set_state(&self, next: ServiceState) {
        let previous = self.state_tx.send_replace(next);
        debug!("{}: {previous} -> {next}", self.identity.name());
        self.metrics.state_changed(next);
    }

    fn lock_attempt(&self) -> MutexGuard<'_, RecoveryAttempt> {
        self.attempt.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
