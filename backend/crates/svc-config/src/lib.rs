mod config;
mod error;
mod lifecycle_config;
mod log_level;
mod logging_config;
mod recovery_config;
mod recovery_tier_config;
mod rpc_config;
mod run_as_account;
mod service_config;
mod start_mode;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use lifecycle_config::LifecycleConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use recovery_config::RecoveryConfig;
pub use recovery_tier_config::{RecoveryTierConfig, RecoveryTiers};
pub use rpc_config::RpcConfig;
pub use run_as_account::RunAsAccount;
pub use service_config::ServiceConfig;
pub use start_mode::StartMode;

const DEFAULT_CONFIG_DIR: &str = ".svc";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_SERVICE_NAME: &str = "echo-service";
const DEFAULT_DISPLAY_NAME: &str = "Echo Service";
const DEFAULT_DESCRIPTION: &str = "Hosts the echo and upper-case RPC endpoints";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5080;
const MIN_PORT: u16 = 1024;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
