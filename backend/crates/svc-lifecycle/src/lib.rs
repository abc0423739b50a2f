//! Service lifecycle management for processes run under an OS service
//! manager: the start/stop state machine, the tiered restart policy and the
//! shell that adapts supervisor events onto them.

mod controller;
mod error;
mod fault;
mod host_exit;
mod host_shell;
mod hosted_service;
mod lifecycle_settings;
mod metrics;
mod recovery_action;
mod recovery_attempt;
mod recovery_policy;
mod recovery_tier;
mod service_identity;
mod service_state;
mod supervisor;
mod timeout_request;
mod transition;

#[cfg(test)]
mod tests;

pub use controller::LifecycleController;
pub use error::{BoxError, FailureCause, LifecycleError, Result as LifecycleResult};
pub use fault::{FaultReceiver, FaultReporter, ServiceFault, fault_channel};
pub use host_exit::HostExit;
pub use host_shell::HostShell;
pub use hosted_service::HostedService;
pub use lifecycle_settings::LifecycleSettings;
pub use metrics::LifecycleMetrics;
pub use recovery_action::RecoveryAction;
pub use recovery_attempt::RecoveryAttempt;
pub use recovery_policy::RecoveryPolicy;
pub use recovery_tier::RecoveryTier;
pub use service_identity::ServiceIdentity;
pub use service_state::ServiceState;
pub use supervisor::{Supervisor, SupervisorTimeouts};
pub use timeout_request::{ServicePhase, TimeoutExtender, TimeoutRequest};
pub use transition::Transition;
