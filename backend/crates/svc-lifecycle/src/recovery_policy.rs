use crate::{RecoveryAction, RecoveryAttempt, RecoveryTier};

use std::time::{Duration, Instant};

/// Tiered restart schedule with a quiet-period reset.
///
/// ```text
/// tiers [(1, 0s), (5, 10s), (10, 60s)]
///
/// failure  1..=4   restart immediately
/// failure  5..=9   restart after 10s
/// failure 10       restart after 60s
/// failure 11+      give up
/// ```
///
/// Tiers are kept sorted by threshold. Callers are expected to hand in a
/// non-empty, strictly ascending schedule (the config layer validates this);
/// an empty schedule gives up on the first failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryPolicy {
    tiers: Vec<RecoveryTier>,
    reset_period: Duration,
}

impl RecoveryPolicy {
    pub fn new(mut tiers: Vec<RecoveryTier>, reset_period: Duration) -> Self {
        tiers.sort_by_key(|tier| tier.after_failures);
        Self {
            tiers,
            reset_period,
        }
    }

    pub fn tiers(&self) -> &[RecoveryTier] {
        &self.tiers
    }

    pub fn reset_period(&self) -> Duration {
        self.reset_period
    }

    /// Highest threshold that still earns a restart.
    pub fn max_failures(&self) -> u32 {
        self.tiers.last().map(|tier| tier.after_failures).unwrap_or(0)
    }

    /// Count one more failure at `now` and pick the action for it.
    ///
    /// Pure: the same inputs always give the same action and updated attempt.
    pub fn decide(
        &self,
        attempt: &RecoveryAttempt,
        now: Instant,
    ) -> (RecoveryAction, RecoveryAttempt) {
        let mut updated = *attempt;

        if now.saturating_duration_since(attempt.window_start) >= self.reset_period {
            updated = RecoveryAttempt::new(now);
        }

        // Capped one past the last tier: enough to keep answering GiveUp
        let cap = self.max_failures().saturating_add(1);
        updated.failure_count = updated.failure_count.saturating_add(1).min(cap);

        let action = if updated.failure_count > self.max_failures() {
            RecoveryAction::GiveUp
        } else {
            let tier = self
                .tiers
                .iter()
                .rev()
                .find(|tier| tier.after_failures <= updated.failure_count)
                .or_else(|| self.tiers.first());

            match tier {
                Some(tier) => RecoveryAction::RestartAfter(tier.delay),
                None => RecoveryAction::GiveUp,
            }
        };

        (action, updated)
    }
}
