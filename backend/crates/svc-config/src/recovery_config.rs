use crate::{ConfigError, ConfigErrorResult, RecoveryTierConfig, RecoveryTiers};

use std::time::Duration;

use serde::Deserialize;

// Recovery schedule constraints
pub const MAX_TIERS: usize = 16;
pub const MAX_TIER_DELAY_SECS: u64 = 86_400;

pub const MIN_RESET_PERIOD_SECS: u64 = 1;
pub const DEFAULT_RESET_PERIOD_SECS: u64 = 3600;

// Default schedule: restart right away on the first failure, back off to
// 10s from the fifth and 60s from the tenth, give up after that.
const DEFAULT_TIERS: [(u32, u64); 3] = [(1, 0), (5, 10), (10, 60)];

/// Restart schedule applied when the running service terminates unexpectedly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    pub tiers: RecoveryTiers,
    /// Quiet period after which the failure counter starts over
    pub reset_period_secs: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            tiers: RecoveryTiers(
                DEFAULT_TIERS
                    .iter()
                    .map(|&(after_failures, delay_secs)| RecoveryTierConfig {
                        after_failures,
                        delay_secs,
                    })
                    .collect(),
            ),
            reset_period_secs: DEFAULT_RESET_PERIOD_SECS,
        }
    }
}

impl RecoveryConfig {
    pub fn reset_period(&self) -> Duration {
        Duration::from_secs(self.reset_period_secs)
    }

    /// Highest configured failure threshold.
    pub fn max_failures(&self) -> u32 {
        self.tiers
            .last()
            .map(|tier| tier.after_failures)
            .unwrap_or(0)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.tiers.is_empty() || self.tiers.len() > MAX_TIERS {
            return Err(ConfigError::recovery(format!(
                "recovery.tiers must have 1-{} entries, got {}",
                MAX_TIERS,
                self.tiers.len()
            )));
        }

        let mut previous = 0;
        for tier in self.tiers.iter() {
            if tier.after_failures <= previous {
                return Err(ConfigError::recovery(format!(
                    "recovery.tiers thresholds must be >= 1 and strictly ascending, got {} after {}",
                    tier.after_failures, previous
                )));
            }

            if tier.delay_secs > MAX_TIER_DELAY_SECS {
                return Err(ConfigError::recovery(format!(
                    "recovery.tiers delay must be <= {}, got {}",
                    MAX_TIER_DELAY_SECS, tier.delay_secs
                )));
            }

            previous = tier.after_failures;
        }

        if self.reset_period_secs < MIN_RESET_PERIOD_SECS {
            return Err(ConfigError::recovery(format!(
                "recovery.reset_period_secs must be >= {}, got {}",
                MIN_RESET_PERIOD_SECS, self.reset_period_secs
            )));
        }

        Ok(())
    }
}
