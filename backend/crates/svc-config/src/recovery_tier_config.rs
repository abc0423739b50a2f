use crate::ConfigError;

use std::ops::Deref;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// One step of the restart schedule: from the `after_failures`-th
/// consecutive failure on, restart after `delay_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RecoveryTierConfig {
    pub after_failures: u32,
    pub delay_secs: u64,
}

impl RecoveryTierConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

/// Ordered restart schedule.
///
/// Parses from the compact `failures:delay_secs` list form used by
/// `SVC_RECOVERY_TIERS`, e.g. `1:0,5:10,10:60`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RecoveryTiers(pub Vec<RecoveryTierConfig>);

impl Deref for RecoveryTiers {
    type Target = [RecoveryTierConfig];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for RecoveryTiers {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiers = s
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (failures, delay) = entry.split_once(':').ok_or_else(|| {
                    ConfigError::recovery(format!(
                        "tier '{entry}' must have the form failures:delay_secs"
                    ))
                })?;

                let after_failures = failures.trim().parse::<u32>().map_err(|e| {
                    ConfigError::recovery(format!("tier '{entry}' has bad failure count: {e}"))
                })?;
                let delay_secs = delay.trim().parse::<u64>().map_err(|e| {
                    ConfigError::recovery(format!("tier '{entry}' has bad delay: {e}"))
                })?;

                Ok(RecoveryTierConfig {
                    after_failures,
                    delay_secs,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(RecoveryTiers(tiers))
    }
}
