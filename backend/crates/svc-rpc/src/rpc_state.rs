use crate::RpcMetrics;

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Shared state handed to every RPC route.
#[derive(Clone)]
pub struct RpcState {
    pub service_name: Arc<str>,
    pub started_at: DateTime<Utc>,
    pub metrics: RpcMetrics,
}

impl RpcState {
    pub fn new(service_name: impl Into<Arc<str>>) -> Self {
        Self {
            service_name: service_name.into(),
            started_at: Utc::now(),
            metrics: RpcMetrics::new(),
        }
    }
}
