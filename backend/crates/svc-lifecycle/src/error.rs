use crate::{ServiceState, Transition};

use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

/// Error type user callbacks report failures with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a start or stop callback did not complete.
#[derive(Error, Debug)]
pub enum FailureCause {
    #[error("{0}")]
    Callback(#[source] BoxError),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("Service failed to start: {cause} {location}")]
    Start {
        #[source]
        cause: FailureCause,
        location: ErrorLocation,
    },

    #[error("Service failed to stop: {cause} {location}")]
    Stop {
        #[source]
        cause: FailureCause,
        location: ErrorLocation,
    },

    #[error("Cannot {attempted} while {from} {location}")]
    InvalidTransition {
        from: ServiceState,
        attempted: Transition,
        location: ErrorLocation,
    },

    #[error("Recovery exhausted after {failures} consecutive failures {location}")]
    RecoveryExhausted {
        failures: u32,
        location: ErrorLocation,
    },
}

impl LifecycleError {
    /// Whether this error comes from call ordering rather than a runtime fault
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Start {
                cause: FailureCause::TimedOut(_),
                ..
            } | Self::Stop {
                cause: FailureCause::TimedOut(_),
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, LifecycleError>;
