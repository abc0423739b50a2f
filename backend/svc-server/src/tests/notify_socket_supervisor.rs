use crate::NotifySocketSupervisor;
use crate::tests::EnvGuard;

use svc_lifecycle::Supervisor;

use std::os::unix::net::UnixDatagram;
use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, eq, none, ok};
use serial_test::serial;
use tempfile::TempDir;

fn listen() -> (TempDir, UnixDatagram, NotifySocketSupervisor) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notify.sock");
    let listener = UnixDatagram::bind(&path).unwrap();
    listener
        .set_read_timeout(Some(Duration::from_secs(1)))
        .unwrap();
    let supervisor = NotifySocketSupervisor::connect(&path).unwrap();
    (temp, listener, supervisor)
}

fn receive(listener: &UnixDatagram) -> String {
    let mut buf = [0u8; 256];
    let len = listener.recv(&mut buf).unwrap();
    String::from_utf8_lossy(&buf[..len]).into_owned()
}

#[test]
fn given_notify_socket_when_ready_then_ready_datagram_sent() {
    // Given
    let (_temp, listener, supervisor) = listen();

    // When
    supervisor.notify_ready();

    // Then
    assert_that!(receive(&listener), eq("READY=1"));
}

#[test]
fn given_notify_socket_when_stopping_then_stopping_datagram_sent() {
    // Given
    let (_temp, listener, supervisor) = listen();

    // When
    supervisor.notify_stopping();

    // Then
    assert_that!(receive(&listener), eq("STOPPING=1"));
}

#[test]
fn given_notify_socket_when_extend_timeout_then_microseconds_sent() {
    // Given
    let (_temp, listener, supervisor) = listen();

    // When
    supervisor.extend_timeout(Duration::from_secs(60));

    // Then
    assert_that!(receive(&listener), eq("EXTEND_TIMEOUT_USEC=60000000"));
}

#[test]
fn given_multiline_status_when_notify_status_then_single_assignment_sent() {
    // Given
    let (_temp, listener, supervisor) = listen();

    // When
    supervisor.notify_status("start failed:\nbind error");

    // Then
    assert_that!(receive(&listener), eq("STATUS=start failed: bind error"));
}

#[test]
fn given_listener_gone_when_notify_then_no_panic() {
    // Given
    let (temp, listener, supervisor) = listen();
    drop(listener);
    drop(temp);

    // When / Then
    supervisor.notify_ready();
}

#[test]
#[serial]
fn given_no_notify_socket_env_when_from_env_then_none() {
    // Given
    let _guard = EnvGuard::remove("NOTIFY_SOCKET");

    // When
    let result = NotifySocketSupervisor::from_env();

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(result.unwrap(), none());
}

#[test]
#[serial]
fn given_notify_socket_env_when_from_env_then_connected_to_path() {
    // Given
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notify.sock");
    let _listener = UnixDatagram::bind(&path).unwrap();
    let _guard = EnvGuard::set("NOTIFY_SOCKET", path.to_str().unwrap());

    // When
    let supervisor = NotifySocketSupervisor::from_env().unwrap();

    // Then
    assert_eq!(supervisor.map(|s| s.path().clone()), Some(path));
}
