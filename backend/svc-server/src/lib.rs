pub mod cli;
pub mod commands;
pub mod detached_supervisor;
pub mod error;
pub mod lifecycle_setup;
pub mod logger;
#[cfg(unix)]
pub mod notify_socket_supervisor;
pub mod service_unit;
pub mod signals;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use commands::Commands;
pub use detached_supervisor::DetachedSupervisor;
pub use error::{Result as ServerResult, ServerError};
pub use lifecycle_setup::{lifecycle_settings, recovery_policy, service_identity};
#[cfg(unix)]
pub use notify_socket_supervisor::NotifySocketSupervisor;
pub use service_unit::ServiceUnit;
pub use signals::shutdown_signal;
