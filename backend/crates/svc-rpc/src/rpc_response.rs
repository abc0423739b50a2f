use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub result: Option<String>,
}
