
use crate::{
    BoxError, HostedService, LifecycleController, LifecycleSettings, RecoveryPolicy,
    RecoveryTier, ServiceIdentity, Supervisor, TimeoutExtender, TimeoutRequest,
};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

pub(crate) const GRACE: Duration = Duration::from_millis(50);

/// What a scripted callback does when invoked
#[derive(Debug, Clone, Copy)]
pub(crate) enum Step {
    Succeed,
    Fail,
    Hang,
    Delay(Duration),
    FailAfter(Duration),
}

impl Step {
    async fn run(self) -> Result<(), BoxError> {
        match self {
            Step::Succeed => Ok(()),
            Step::Fail => Err("scripted failure".into()),
            Step::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
            Step::Delay(duration) => {
                tokio::time::sleep(duration).await;
                Ok(())
            }
            Step::FailAfter(duration) => {
                tokio::time::sleep(duration).await;
                Err("scripted failure".into())
            }
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct CallCounts {
    starts: AtomicU32,
    stops: AtomicU32,
}

impl CallCounts {
    pub(crate) fn starts(&self) -> u32 {
        self.starts.load(Ordering::SeqCst)
    }

    pub(crate) fn stops(&self) -> u32 {
        self.stops.load(Ordering::SeqCst)
    }
}

/// Hosted service whose callbacks follow a script; succeeds once the
/// script runs out
#[derive(Default)]
pub(crate) struct ScriptedService {
    start_steps: VecDeque<Step>,
    stop_steps: VecDeque<Step>,
    calls: Arc<CallCounts>,
}

impl ScriptedService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn starts(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.start_steps = steps.into_iter().collect();
        self
    }

    pub(crate) fn stops(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.stop_steps = steps.into_iter().collect();
        self
    }

    pub(crate) fn calls(&self) -> Arc<CallCounts> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl HostedService for ScriptedService {
    async fn start(&mut self) -> Result<(), BoxError> {
        self.calls.starts.fetch_add(1, Ordering::SeqCst);
        let step = self.start_steps.pop_front().unwrap_or(Step::Succeed);
        step.run().await
    }

    async fn stop(&mut self) -> Result<(), BoxError> {
        self.calls.stops.fetch_add(1, Ordering::SeqCst);
        let step = self.stop_steps.pop_front().unwrap_or(Step::Succeed);
        step.run().await
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingExtender {
    requests: Mutex<Vec<TimeoutRequest>>,
}

impl RecordingExtender {
    pub(crate) fn requests(&self) -> Vec<TimeoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl TimeoutExtender for RecordingExtender {
    fn request_additional_time(&self, request: TimeoutRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SupervisorEvent {
    Ready,
    Stopping,
    ExtendTimeout(Duration),
    Status(String),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSupervisor {
    events: Mutex<Vec<SupervisorEvent>>,
}

impl RecordingSupervisor {
    pub(crate) fn events(&self) -> Vec<SupervisorEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: SupervisorEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Supervisor for RecordingSupervisor {
    fn notify_ready(&self) {
        self.record(SupervisorEvent::Ready);
    }

    fn notify_stopping(&self) {
        self.record(SupervisorEvent::Stopping);
    }

    fn extend_timeout(&self, extra: Duration) {
        self.record(SupervisorEvent::ExtendTimeout(extra));
    }

    fn notify_status(&self, status: &str) {
        self.record(SupervisorEvent::Status(status.to_string()));
    }
}

pub(crate) fn identity() -> ServiceIdentity {
    ServiceIdentity::new("test-service", "Test Service", "Service under test")
}

pub(crate) fn settings() -> LifecycleSettings {
    LifecycleSettings {
        start_grace: GRACE,
        stop_grace: GRACE,
        timeout_extensions: 1,
    }
}

/// Tiers given as (after_failures, delay in milliseconds)
pub(crate) fn policy(tiers: &[(u32, u64)]) -> RecoveryPolicy {
    RecoveryPolicy::new(
        tiers
            .iter()
            .map(|&(after, millis)| RecoveryTier::new(after, Duration::from_millis(millis)))
            .collect(),
        Duration::from_secs(3600),
    )
}

pub(crate) fn controller_with(
    service: ScriptedService,
    settings: LifecycleSettings,
    policy: RecoveryPolicy,
) -> (LifecycleController<ScriptedService>, Arc<RecordingExtender>) {
    let extender = Arc::new(RecordingExtender::default());
    let controller = LifecycleController::new(
        identity(),
        settings,
        policy,
        service,
        Arc::clone(&extender) as Arc<dyn TimeoutExtender>,
    );
    (controller, extender)
}

pub(crate) fn controller(
    service: ScriptedService,
) -> (LifecycleController<ScriptedService>, Arc<RecordingExtender>) {
    controller_with(service, settings(), policy(&[(1, 0), (5, 10_000), (10, 60_000)]))
}
