use crate::ConfigError;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Account the supervisor runs the service under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunAsAccount {
    /// Minimal-privilege account with no network credentials
    #[default]
    LocalService,
    /// Minimal-privilege account that authenticates to the network as the host
    NetworkService,
    /// Full administrative account
    LocalSystem,
}

impl RunAsAccount {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalService => "local_service",
            Self::NetworkService => "network_service",
            Self::LocalSystem => "local_system",
        }
    }
}

impl fmt::Display for RunAsAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunAsAccount {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local_service" => Ok(Self::LocalService),
            "network_service" => Ok(Self::NetworkService),
            "local_system" => Ok(Self::LocalSystem),
            other => Err(ConfigError::service(format!(
                "unknown run_as account '{other}'"
            ))),
        }
    }
}
