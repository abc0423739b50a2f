use crate::{ServerError, ServerResult};

use svc_lifecycle::Supervisor;

use std::os::unix::net::{SocketAddr, UnixDatagram};
use std::panic::Location;
use std::path::PathBuf;
use std::time::Duration;

use error_location::ErrorLocation;
use log::{debug, warn};

/// Environment variable systemd sets for `Type=notify` services
pub const NOTIFY_SOCKET_ENV: &str = "NOTIFY_SOCKET";

/// Talks to systemd over the `sd_notify` datagram protocol.
#[derive(Debug)]
pub struct NotifySocketSupervisor {
    socket: UnixDatagram,
    addr: SocketAddr,
    path: PathBuf,
}

impl NotifySocketSupervisor {
    /// Connect to the socket named by `NOTIFY_SOCKET`, if set.
    pub fn from_env() -> ServerResult<Option<Self>> {
        match std::env::var_os(NOTIFY_SOCKET_ENV) {
            Some(path) if !path.is_empty() => Self::connect(PathBuf::from(path)).map(Some),
            _ => Ok(None),
        }
    }

    /// Connect to a notify socket. A leading `@` names a socket in the
    /// Linux abstract namespace.
    #[track_caller]
    pub fn connect(path: impl Into<PathBuf>) -> ServerResult<Self> {
        let path = path.into();
        let caller = Location::caller();
        let unusable = |source: std::io::Error| ServerError::NotifySocket {
            path: path.clone(),
            source,
            location: ErrorLocation::from(caller),
        };

        let addr = Self::socket_addr(&path).map_err(unusable)?;
        let socket = UnixDatagram::unbound().map_err(unusable)?;

        Ok(Self { socket, addr, path })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    #[cfg(target_os = "linux")]
    fn socket_addr(path: &std::path::Path) -> std::io::Result<SocketAddr> {
        use std::os::linux::net::SocketAddrExt;
        use std::os::unix::ffi::OsStrExt;

        match path.as_os_str().as_bytes().strip_prefix(b"@") {
            Some(name) => SocketAddr::from_abstract_name(name),
            None => SocketAddr::from_pathname(path),
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn socket_addr(path: &std::path::Path) -> std::io::Result<SocketAddr> {
        SocketAddr::from_pathname(path)
    }

    fn send(&self, state: &str) {
        debug!("sd_notify: {state}");
        if let Err(e) = self.socket.send_to_addr(state.as_bytes(), &self.addr) {
            warn!("Failed to notify supervisor at {}: {e}", self.path.display());
        }
    }
}

impl Supervisor for NotifySocketSupervisor {
    fn notify_ready(&self) {
        self.send("READY=1");
    }

    fn notify_stopping(&self) {
        self.send("STOPPING=1");
    }

    fn extend_timeout(&self, extra: Duration) {
        self.send(&format!("EXTEND_TIMEOUT_USEC={}", extra.as_micros()));
    }

    fn notify_status(&self, status: &str) {
        // Newlines would start a new assignment
        self.send(&format!("STATUS={}", status.replace('\n', " ")));
    }
}
