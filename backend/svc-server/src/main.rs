//! svc-host - supervised echo RPC service
//!
//! ```bash
//! # Run under systemd (or in a console)
//! svc-host run
//!
//! # Install as a systemd unit
//! svc-host unit > /etc/systemd/system/echo-service.service
//! ```

use svc_config::Config;
use svc_lifecycle::{HostExit, HostShell, Supervisor, fault_channel};
use svc_rpc::RpcService;
use svc_server::{
    Cli, Commands, DetachedSupervisor, ServerError, ServerResult, ServiceUnit, lifecycle_settings,
    logger, recovery_policy, service_identity, shutdown_signal,
};

use std::panic::Location;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use error_location::ErrorLocation;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => host().await,
        Commands::Unit { exec_start } => print_unit(exec_start),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            // The logger may not be up yet
            eprintln!("svc-host: {e}");
            log::logger().flush();
            ExitCode::FAILURE
        }
    }
}

async fn host() -> ServerResult<ExitCode> {
    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file = config.log_file_path()?;
    if let Some(log_dir) = log_file.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(log_dir).map_err(|e| ServerError::Io {
            path: log_dir.to_path_buf(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;

    info!("Starting svc-host v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let supervisor = supervisor()?;

    let (reporter, faults) = fault_channel();
    let service = RpcService::new(
        config.rpc.bind_addr(),
        config.service.name.as_str(),
        reporter,
    );

    let shell = HostShell::new(
        service_identity(&config.service),
        lifecycle_settings(&config.lifecycle),
        recovery_policy(&config.recovery),
        service,
        supervisor,
        faults,
    );

    let exit = shell.run(shutdown_signal()).await;
    match exit {
        HostExit::Clean => info!("{} stopped cleanly", config.service.name),
        other => error!("{} exiting after {other:?}", config.service.name),
    }

    log::logger().flush();
    Ok(ExitCode::from(exit.code()))
}

#[cfg(unix)]
fn supervisor() -> ServerResult<Arc<dyn Supervisor>> {
    match svc_server::NotifySocketSupervisor::from_env()? {
        Some(notify) => {
            info!("Notifying supervisor via {}", notify.path().display());
            Ok(Arc::new(notify))
        }
        None => {
            info!("No supervisor notify socket, running detached");
            Ok(Arc::new(DetachedSupervisor))
        }
    }
}

#[cfg(not(unix))]
fn supervisor() -> ServerResult<Arc<dyn Supervisor>> {
    Ok(Arc::new(DetachedSupervisor))
}

fn print_unit(exec_start: Option<std::path::PathBuf>) -> ServerResult<ExitCode> {
    let config = Config::load()?;
    config.validate()?;

    let exec_start = match exec_start {
        Some(path) => path,
        None => std::env::current_exe().map_err(|e| ServerError::Io {
            path: "current executable".into(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?,
    };

    let unit = ServiceUnit::new(&config, exec_start).with_config_dir(Config::config_dir()?);
    print!("{}", unit.render());

    Ok(ExitCode::SUCCESS)
}
