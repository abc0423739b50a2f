use svc_config::{Config, RunAsAccount, StartMode};

use std::path::{Path, PathBuf};

/// systemd unit rendered from the service configuration.
///
/// Restarts inside the tiered schedule happen in-process; the unit only
/// restarts the whole process once the schedule gives up, rate-limited to
/// one burst of `tiers.len()` per reset period.
pub struct ServiceUnit<'a> {
    config: &'a Config,
    exec_start: PathBuf,
    config_dir: Option<PathBuf>,
}

impl<'a> ServiceUnit<'a> {
    pub fn new(config: &'a Config, exec_start: impl Into<PathBuf>) -> Self {
        Self {
            config,
            exec_start: exec_start.into(),
            config_dir: None,
        }
    }

    /// Pin `SVC_CONFIG_DIR` in the unit's environment.
    pub fn with_config_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn render(&self) -> String {
        let service = &self.config.service;
        let lifecycle = &self.config.lifecycle;
        let recovery = &self.config.recovery;

        let mut lines = vec![
            format!("# {}", service.description),
            String::from("[Unit]"),
            format!("Description={}", service.display_name),
        ];

        match service.start_mode {
            StartMode::AutomaticDelayed => {
                lines.push(String::from("Wants=network-online.target"));
                lines.push(String::from("After=network-online.target"));
            }
            StartMode::Automatic | StartMode::Manual | StartMode::Disabled => {
                lines.push(String::from("After=network.target"));
            }
        }

        lines.push(format!(
            "StartLimitIntervalSec={}",
            recovery.reset_period_secs
        ));
        lines.push(format!("StartLimitBurst={}", recovery.tiers.len()));

        lines.push(String::new());
        lines.push(String::from("[Service]"));
        lines.push(String::from("Type=notify"));
        lines.push(String::from("NotifyAccess=main"));
        lines.push(format!("ExecStart={} run", self.exec_start.display()));
        if let Some(ref dir) = self.config_dir {
            lines.push(format!("Environment=SVC_CONFIG_DIR={}", dir.display()));
        }
        lines.push(String::from("Restart=on-failure"));
        lines.push(format!("RestartSec={}", self.restart_delay_secs()));

        let start_timeout = lifecycle
            .start_grace_secs
            .saturating_mul(u64::from(lifecycle.timeout_extensions) + 1);
        lines.push(format!("TimeoutStartSec={start_timeout}"));
        lines.push(format!("TimeoutStopSec={}", lifecycle.stop_timeout_secs));
        lines.extend(Self::account_lines(service.run_as));

        match service.start_mode {
            StartMode::Automatic | StartMode::AutomaticDelayed => {
                lines.push(String::new());
                lines.push(String::from("[Install]"));
                lines.push(String::from("WantedBy=multi-user.target"));
            }
            StartMode::Manual => {}
            StartMode::Disabled => {
                lines.push(String::new());
                lines.push(format!(
                    "# Disabled: run `systemctl mask {}.service` after installing",
                    service.name
                ));
            }
        }

        let mut unit = lines.join("\n");
        unit.push('\n');
        unit
    }

    /// Process-level restart waits as long as the last in-process tier.
    fn restart_delay_secs(&self) -> u64 {
        self.config
            .recovery
            .tiers
            .last()
            .map(|tier| tier.delay_secs)
            .unwrap_or(0)
    }

    fn account_lines(run_as: RunAsAccount) -> Vec<String> {
        match run_as {
            RunAsAccount::LocalService => vec![String::from("DynamicUser=yes")],
            RunAsAccount::NetworkService => vec![
                String::from("DynamicUser=yes"),
                String::from("AmbientCapabilities=CAP_NET_BIND_SERVICE"),
            ],
            RunAsAccount::LocalSystem => vec![String::from("User=root")],
        }
    }
}
