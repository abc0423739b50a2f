/// How a host run ended, mapped onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostExit {
    /// Supervisor-initiated shutdown completed cleanly
    Clean,
    /// Start failed and no recovery was attempted
    StartFailed,
    /// The stop callback failed or timed out
    StopFailed,
    /// The restart schedule gave up
    RecoveryExhausted,
}

impl HostExit {
    pub fn code(&self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::StartFailed | Self::StopFailed | Self::RecoveryExhausted => 1,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code() == 0
    }
}
