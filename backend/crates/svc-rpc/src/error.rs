use std::net::SocketAddr;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Failed to bind RPC listener on {addr}: {source} {location}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("RPC server on {addr} failed: {source} {location}")]
    Serve {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("RPC server on {addr} exited without a shutdown request {location}")]
    UnexpectedExit {
        addr: SocketAddr,
        location: ErrorLocation,
    },

    #[error("RPC server task failed: {source} {location}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, RpcError>;
