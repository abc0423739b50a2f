use crate::ServiceUnit;

use svc_config::{Config, RunAsAccount, StartMode};

use googletest::assert_that;
use googletest::prelude::{contains_substring, not};

fn render(config: &Config) -> String {
    ServiceUnit::new(config, "/usr/local/bin/svc-host").render()
}

#[test]
fn given_default_config_when_rendered_then_notify_service_with_restart_on_failure() {
    // Given
    let config = Config::default();

    // When
    let unit = render(&config);

    // Then
    assert_that!(unit, contains_substring("Type=notify"));
    assert_that!(unit, contains_substring("ExecStart=/usr/local/bin/svc-host run"));
    assert_that!(unit, contains_substring("Restart=on-failure"));
    assert_that!(unit, contains_substring("Description=Echo Service"));
}

#[test]
fn given_default_config_when_rendered_then_timeouts_from_lifecycle_section() {
    // Given
    let config = Config::default();

    // When
    let unit = render(&config);

    // Then
    assert_that!(unit, contains_substring("TimeoutStartSec=120"));
    assert_that!(unit, contains_substring("TimeoutStopSec=300"));
}

#[test]
fn given_default_config_when_rendered_then_start_limit_from_recovery_schedule() {
    // Given
    let config = Config::default();

    // When
    let unit = render(&config);

    // Then
    assert_that!(unit, contains_substring("StartLimitIntervalSec=3600"));
    assert_that!(unit, contains_substring("StartLimitBurst=3"));
    assert_that!(unit, contains_substring("RestartSec=60"));
}

#[test]
fn given_default_start_mode_when_rendered_then_waits_for_network_online() {
    // Given
    let config = Config::default();

    // When
    let unit = render(&config);

    // Then
    assert_that!(unit, contains_substring("After=network-online.target"));
    assert_that!(unit, contains_substring("WantedBy=multi-user.target"));
    assert_that!(unit, contains_substring("DynamicUser=yes"));
}

#[test]
fn given_manual_start_mode_when_rendered_then_no_install_section() {
    // Given
    let mut config = Config::default();
    config.service.start_mode = StartMode::Manual;

    // When
    let unit = render(&config);

    // Then
    assert_that!(unit, not(contains_substring("[Install]")));
    assert_that!(unit, contains_substring("After=network.target"));
}

#[test]
fn given_disabled_start_mode_when_rendered_then_mask_hint() {
    // Given
    let mut config = Config::default();
    config.service.start_mode = StartMode::Disabled;

    // When
    let unit = render(&config);

    // Then
    assert_that!(unit, not(contains_substring("WantedBy=")));
    assert_that!(
        unit,
        contains_substring("systemctl mask echo-service.service")
    );
}

#[test]
fn given_local_system_account_when_rendered_then_runs_as_root() {
    // Given
    let mut config = Config::default();
    config.service.run_as = RunAsAccount::LocalSystem;

    // When
    let unit = render(&config);

    // Then
    assert_that!(unit, contains_substring("User=root"));
    assert_that!(unit, not(contains_substring("DynamicUser")));
}

#[test]
fn given_config_dir_when_rendered_then_environment_pinned() {
    // Given
    let config = Config::default();

    // When
    let unit = ServiceUnit::new(&config, "/opt/svc/svc-host")
        .with_config_dir("/etc/echo-service")
        .render();

    // Then
    assert_that!(
        unit,
        contains_substring("Environment=SVC_CONFIG_DIR=/etc/echo-service")
    );
}
