use crate::BoxError;

use async_trait::async_trait;

/// The service instance whose lifecycle is managed.
///
/// `start` should return once the service is accepting work; background
/// workers it spawns report crashes through a [`crate::FaultReporter`].
/// `stop` must release everything `start` acquired and tolerate being
/// called after a crash.
#[async_trait]
pub trait HostedService: Send + 'static {
    async fn start(&mut self) -> Result<(), BoxError>;

    async fn stop(&mut self) -> Result<(), BoxError>;
}
