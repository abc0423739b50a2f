//! Echo/upper-case RPC facade served over HTTP+JSON, and the hosted
//! service that runs it under the lifecycle controller.

pub mod error;
pub mod handlers;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod rpc_handler;
pub mod rpc_request;
pub mod rpc_response;
pub mod rpc_service;
pub mod rpc_state;
pub mod shutdown_coordinator;
pub mod shutdown_guard;

#[cfg(test)]
mod tests;

pub use error::{Result, RpcError};
pub use metrics::RpcMetrics;
pub use routes::build_router;
pub use rpc_handler::{echo, upper_case};
pub use rpc_request::RpcRequest;
pub use rpc_response::RpcResponse;
pub use rpc_service::RpcService;
pub use rpc_state::RpcState;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
