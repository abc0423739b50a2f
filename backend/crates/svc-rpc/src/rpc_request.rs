use serde::Deserialize;

/// Body of every RPC call. `message` may be `null` or missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub message: Option<String>,
}
