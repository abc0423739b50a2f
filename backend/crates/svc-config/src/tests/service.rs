use crate::tests::{EnvGuard, setup_config_dir};
use crate::{Config, RunAsAccount, StartMode};

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Service identity
// =========================================================================

#[test]
#[serial]
fn given_empty_name_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _name = EnvGuard::set("SVC_SERVICE_NAME", "");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_name_with_space_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _name = EnvGuard::set("SVC_SERVICE_NAME", "echo service");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_dotted_name_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _name = EnvGuard::set("SVC_SERVICE_NAME", "EMG.NybusWindowsService");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_blank_display_name_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _display = EnvGuard::set("SVC_SERVICE_DISPLAY_NAME", "   ");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_run_as_and_start_mode_env_when_load_then_applied() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _run_as = EnvGuard::set("SVC_SERVICE_RUN_AS", "LOCAL_SYSTEM");
    let _mode = EnvGuard::set("SVC_SERVICE_START_MODE", "automatic");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.service.run_as, eq(RunAsAccount::LocalSystem));
    assert_that!(config.service.start_mode, eq(StartMode::Automatic));
}

#[test]
fn given_unknown_account_when_parse_then_error() {
    assert_that!(RunAsAccount::from_str("administrator"), err(anything()));
}

#[test]
fn given_start_mode_when_displayed_then_snake_case() {
    assert_that!(
        StartMode::AutomaticDelayed.to_string().as_str(),
        eq("automatic_delayed")
    );
}
