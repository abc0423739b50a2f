use std::fmt;

/// Operation requested of the lifecycle controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Stop,
    /// Report an unexpected termination
    Recover,
    /// Run a queued restart
    Restart,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Recover => "recover",
            Self::Restart => "restart",
        })
    }
}
