use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DESCRIPTION, DEFAULT_DISPLAY_NAME,
    DEFAULT_SERVICE_NAME, RunAsAccount, StartMode,
};

use serde::Deserialize;

pub const MAX_NAME_LENGTH: usize = 256;

/// Identity and registration settings handed to the supervisor.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Machine name, used for the unit file and log lines
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub run_as: RunAsAccount,
    pub start_mode: StartMode,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_SERVICE_NAME),
            display_name: String::from(DEFAULT_DISPLAY_NAME),
            description: String::from(DEFAULT_DESCRIPTION),
            run_as: RunAsAccount::default(),
            start_mode: StartMode::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.name.is_empty() || self.name.len() > MAX_NAME_LENGTH {
            return Err(ConfigError::service(format!(
                "service.name must be 1-{} characters, got {}",
                MAX_NAME_LENGTH,
                self.name.len()
            )));
        }

        // Unit names only allow a restricted character set
        if let Some(bad) = self
            .name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')))
        {
            return Err(ConfigError::service(format!(
                "service.name contains invalid character '{bad}'"
            )));
        }

        if self.display_name.trim().is_empty() {
            return Err(ConfigError::service("service.display_name cannot be empty"));
        }

        Ok(())
    }
}
