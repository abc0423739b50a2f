//! Conversions from the configuration file shapes into the lifecycle
//! crate's runtime types.

use svc_config::{LifecycleConfig, RecoveryConfig, ServiceConfig};
use svc_lifecycle::{LifecycleSettings, RecoveryPolicy, RecoveryTier, ServiceIdentity};

pub fn service_identity(config: &ServiceConfig) -> ServiceIdentity {
    ServiceIdentity::new(
        config.name.as_str(),
        config.display_name.as_str(),
        config.description.as_str(),
    )
}

pub fn lifecycle_settings(config: &LifecycleConfig) -> LifecycleSettings {
    LifecycleSettings {
        start_grace: config.start_grace(),
        stop_grace: config.stop_grace(),
        timeout_extensions: config.timeout_extensions,
    }
}

pub fn recovery_policy(config: &RecoveryConfig) -> RecoveryPolicy {
    let tiers = config
        .tiers
        .iter()
        .map(|tier| RecoveryTier::new(tier.after_failures, tier.delay()))
        .collect();

    RecoveryPolicy::new(tiers, config.reset_period())
}
