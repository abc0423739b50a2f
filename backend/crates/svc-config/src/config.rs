use crate::{
    CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR, LifecycleConfig,
    LoggingConfig, RecoveryConfig, RpcConfig, ServiceConfig,
};

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub lifecycle: LifecycleConfig,
    pub recovery: RecoveryConfig,
    pub rpc: RpcConfig,
    pub logging: LoggingConfig,
    /// `SVC_*` overrides that failed to parse, as `NAME=value`
    #[serde(skip)]
    rejected_overrides: Vec<String>,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for SVC_CONFIG_DIR env var, else use ./.svc/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply SVC_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: SVC_CONFIG_DIR env var > ./.svc/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var("SVC_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.service.validate()?;
        self.lifecycle.validate()?;
        self.recovery.validate()?;
        self.rpc.validate()?;

        let log_dir = Path::new(&self.logging.dir);
        if log_dir.is_absolute() || self.logging.dir.contains("..") {
            return Err(ConfigError::config(
                "logging.dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref filename) => {
                let config_dir = Self::config_dir()?;
                Ok(Some(config_dir.join(&self.logging.dir).join(filename)))
            }
            None => Ok(None),
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  service: {} ({}) run_as={} start_mode={}",
            self.service.name, self.service.display_name, self.service.run_as,
            self.service.start_mode
        );
        info!(
            "  lifecycle: start_grace={}s, stop_grace={}s, stop_timeout={}s, extensions={}",
            self.lifecycle.start_grace_secs,
            self.lifecycle.stop_grace_secs,
            self.lifecycle.stop_timeout_secs,
            self.lifecycle.timeout_extensions
        );

        let tiers = self
            .recovery
            .tiers
            .iter()
            .map(|tier| format!("{}:{}s", tier.after_failures, tier.delay_secs))
            .collect::<Vec<_>>()
            .join(", ");
        info!(
            "  recovery: [{}], reset after {}s",
            tiers, self.recovery.reset_period_secs
        );

        info!("  rpc: {}", self.rpc.bind_addr());
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );

        for rejected in &self.rejected_overrides {
            warn!("  ignored unparseable override {rejected}");
        }
    }

    /// Environment overrides ignored by [`Config::load`] because their
    /// values did not parse. Reported by [`Config::log_summary`], which
    /// runs once the logger is up.
    pub fn rejected_overrides(&self) -> &[String] {
        &self.rejected_overrides
    }

    fn apply_env_overrides(&mut self) {
        let mut rejected = Vec::new();

        // Service
        Self::apply_env_string("SVC_SERVICE_NAME", &mut self.service.name);
        Self::apply_env_string("SVC_SERVICE_DISPLAY_NAME", &mut self.service.display_name);
        Self::apply_env_string("SVC_SERVICE_DESCRIPTION", &mut self.service.description);
        Self::apply_env_parse(
            "SVC_SERVICE_RUN_AS",
            &mut self.service.run_as,
            &mut rejected,
        );
        Self::apply_env_parse(
            "SVC_SERVICE_START_MODE",
            &mut self.service.start_mode,
            &mut rejected,
        );

        // Lifecycle
        Self::apply_env_parse(
            "SVC_LIFECYCLE_START_GRACE_SECS",
            &mut self.lifecycle.start_grace_secs,
            &mut rejected,
        );
        Self::apply_env_parse(
            "SVC_LIFECYCLE_STOP_GRACE_SECS",
            &mut self.lifecycle.stop_grace_secs,
            &mut rejected,
        );
        Self::apply_env_parse(
            "SVC_LIFECYCLE_STOP_TIMEOUT_SECS",
            &mut self.lifecycle.stop_timeout_secs,
            &mut rejected,
        );
        Self::apply_env_parse(
            "SVC_LIFECYCLE_TIMEOUT_EXTENSIONS",
            &mut self.lifecycle.timeout_extensions,
            &mut rejected,
        );

        // Recovery
        Self::apply_env_parse(
            "SVC_RECOVERY_TIERS",
            &mut self.recovery.tiers,
            &mut rejected,
        );
        Self::apply_env_parse(
            "SVC_RECOVERY_RESET_PERIOD_SECS",
            &mut self.recovery.reset_period_secs,
            &mut rejected,
        );

        // RPC
        Self::apply_env_string("SVC_RPC_HOST", &mut self.rpc.host);
        Self::apply_env_parse(
            "SVC_RPC_PORT",
            &mut self.rpc.port,
            &mut rejected,
        );

        // Logging
        Self::apply_env_parse(
            "SVC_LOG_LEVEL",
            &mut self.logging.level,
            &mut rejected,
        );
        Self::apply_env_bool("SVC_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("SVC_LOG_FILE", &mut self.logging.file);

        self.rejected_overrides = rejected;
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values.
    /// Unparseable values keep the file/default value and are recorded in
    /// `rejected`.
    fn apply_env_parse<T: std::str::FromStr>(
        var_name: &str,
        target: &mut T,
        rejected: &mut Vec<String>,
    ) {
        if let Ok(val) = std::env::var(var_name) {
            match val.parse() {
                Ok(parsed) => *target = parsed,
                Err(_) => rejected.push(format!("{var_name}={val}")),
            }
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
