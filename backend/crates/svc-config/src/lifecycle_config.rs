use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Lifecycle timing constraints
pub const MIN_GRACE_SECS: u64 = 1;
pub const MAX_GRACE_SECS: u64 = 3600;
pub const DEFAULT_START_GRACE_SECS: u64 = 60;
pub const DEFAULT_STOP_GRACE_SECS: u64 = 60;

pub const DEFAULT_STOP_TIMEOUT_SECS: u64 = 300;

pub const MAX_TIMEOUT_EXTENSIONS: u32 = 10;
pub const DEFAULT_TIMEOUT_EXTENSIONS: u32 = 1;

/// Start/stop timing negotiated with the supervisor.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Extra time requested before the start callback runs
    pub start_grace_secs: u64,
    /// Extra time requested before the stop callback runs
    pub stop_grace_secs: u64,
    /// Supervisor-side limit for the whole stop phase
    pub stop_timeout_secs: u64,
    /// Additional grace periods requested when a callback overruns
    pub timeout_extensions: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            start_grace_secs: DEFAULT_START_GRACE_SECS,
            stop_grace_secs: DEFAULT_STOP_GRACE_SECS,
            stop_timeout_secs: DEFAULT_STOP_TIMEOUT_SECS,
            timeout_extensions: DEFAULT_TIMEOUT_EXTENSIONS,
        }
    }
}

impl LifecycleConfig {
    pub fn start_grace(&self) -> Duration {
        Duration::from_secs(self.start_grace_secs)
    }

    pub fn stop_grace(&self) -> Duration {
        Duration::from_secs(self.stop_grace_secs)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_secs(self.stop_timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.start_grace_secs < MIN_GRACE_SECS || self.start_grace_secs > MAX_GRACE_SECS {
            return Err(ConfigError::lifecycle(format!(
                "lifecycle.start_grace_secs must be {}-{}, got {}",
                MIN_GRACE_SECS, MAX_GRACE_SECS, self.start_grace_secs
            )));
        }

        if self.stop_grace_secs < MIN_GRACE_SECS || self.stop_grace_secs > MAX_GRACE_SECS {
            return Err(ConfigError::lifecycle(format!(
                "lifecycle.stop_grace_secs must be {}-{}, got {}",
                MIN_GRACE_SECS, MAX_GRACE_SECS, self.stop_grace_secs
            )));
        }

        if self.stop_timeout_secs < self.stop_grace_secs {
            return Err(ConfigError::lifecycle(format!(
                "lifecycle.stop_timeout_secs ({}) must be >= stop_grace_secs ({})",
                self.stop_timeout_secs, self.stop_grace_secs
            )));
        }

        if self.timeout_extensions > MAX_TIMEOUT_EXTENSIONS {
            return Err(ConfigError::lifecycle(format!(
                "lifecycle.timeout_extensions must be 0-{}, got {}",
                MAX_TIMEOUT_EXTENSIONS, self.timeout_extensions
            )));
        }

        Ok(())
    }
}
