use crate::{RpcError, RpcState, ShutdownCoordinator, build_router};

use svc_lifecycle::{BoxError, FaultReporter, HostedService};

use std::net::SocketAddr;
use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::{error, info, warn};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server task started by [`RpcService::start`].
struct RunningServer {
    local_addr: SocketAddr,
    shutdown: ShutdownCoordinator,
    handle: JoinHandle<()>,
}

/// Runs the RPC facade as the hosted service.
///
/// `start` returns once the listener is bound; the server itself runs on
/// a spawned task. If that task ends without `stop` having asked it to,
/// the failure is reported as a service fault.
pub struct RpcService {
    bind_addr: String,
    service_name: String,
    faults: FaultReporter,
    running: Option<RunningServer>,
}

impl RpcService {
    pub fn new(
        bind_addr: impl Into<String>,
        service_name: impl Into<String>,
        faults: FaultReporter,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            service_name: service_name.into(),
            faults,
            running: None,
        }
    }

    /// Address actually bound; differs from the configured one for port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|running| running.local_addr)
    }

    async fn shut_down(running: RunningServer) -> Result<(), RpcError> {
        running.shutdown.shutdown();
        running.handle.await.map_err(|e| RpcError::Task {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;
        info!("RPC server on {} stopped", running.local_addr);
        Ok(())
    }
}

#[async_trait]
impl HostedService for RpcService {
    async fn start(&mut self) -> Result<(), BoxError> {
        if let Some(previous) = self.running.take() {
            warn!(
                "Cleaning up RPC server left over on {} before restart",
                previous.local_addr
            );
            if let Err(e) = Self::shut_down(previous).await {
                warn!("Previous RPC server did not shut down cleanly: {e}");
            }
        }

        let listener = TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| RpcError::Bind {
                addr: self.bind_addr.clone(),
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let local_addr = listener.local_addr().map_err(|e| RpcError::Bind {
            addr: self.bind_addr.clone(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let app = build_router(RpcState::new(self.service_name.as_str()));
        let shutdown = ShutdownCoordinator::new();
        let mut guard = shutdown.subscribe_guard();
        let shutdown_for_task = shutdown.clone();
        let faults = self.faults.clone();

        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move { guard.wait().await })
                .await;

            let location = ErrorLocation::from(Location::caller());
            match result {
                Err(e) => {
                    let e = RpcError::Serve {
                        addr: local_addr,
                        source: e,
                        location,
                    };
                    error!("{e}");
                    faults.report(e);
                }
                Ok(()) if !shutdown_for_task.is_shutdown() => {
                    let e = RpcError::UnexpectedExit {
                        addr: local_addr,
                        location,
                    };
                    error!("{e}");
                    faults.report(e);
                }
                Ok(()) => {}
            }
        });

        info!("RPC server listening on {local_addr}");
        self.running = Some(RunningServer {
            local_addr,
            shutdown,
            handle,
        });

        Ok(())
    }

    async fn stop(&mut self) -> Result<(), BoxError> {
        match self.running.take() {
            Some(running) => Ok(Self::shut_down(running).await?),
            None => Ok(()),
        }
    }
}
