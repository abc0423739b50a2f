use std::time::Duration;

/// What to do after an unexpected termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    RestartAfter(Duration),
    GiveUp,
}
