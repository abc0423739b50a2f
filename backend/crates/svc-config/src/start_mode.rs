use crate::ConfigError;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// How the supervisor starts the service at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartMode {
    /// Start during boot
    Automatic,
    /// Start after the rest of the boot sequence has settled
    #[default]
    AutomaticDelayed,
    /// Start only on explicit request
    Manual,
    /// Never start
    Disabled,
}

impl StartMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::AutomaticDelayed => "automatic_delayed",
            Self::Manual => "manual",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for StartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "automatic" => Ok(Self::Automatic),
            "automatic_delayed" => Ok(Self::AutomaticDelayed),
            "manual" => Ok(Self::Manual),
            "disabled" => Ok(Self::Disabled),
            other => Err(ConfigError::service(format!(
                "unknown start_mode '{other}'"
            ))),
        }
    }
}
