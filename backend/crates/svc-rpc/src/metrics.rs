use metrics::counter;

/// Metrics collector for RPC calls
#[derive(Clone)]
pub struct RpcMetrics {
    prefix: &'static str,
}

impl RpcMetrics {
    pub fn new() -> Self {
        Self { prefix: "svc_rpc" }
    }

    /// Record an RPC call by method name
    pub fn call_received(&self, method: &str) {
        counter!(format!("{}.calls.total", self.prefix)).increment(1);
        counter!(format!("{}.calls.{}", self.prefix, method)).increment(1);
    }

    /// Record a call that carried no message
    pub fn empty_message(&self, method: &str) {
        counter!(format!("{}.calls.{}.empty", self.prefix, method)).increment(1);
    }
}

impl Default for RpcMetrics {
    fn default() -> Self {
        Self::new()
    }
}
