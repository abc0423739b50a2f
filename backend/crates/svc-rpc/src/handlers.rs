use crate::{RpcRequest, RpcResponse, RpcState, echo, upper_case};

use axum::{Json, extract::State};

/// POST /rpc/echo
pub async fn echo_handler(
    State(state): State<RpcState>,
    Json(request): Json<RpcRequest>,
) -> Json<RpcResponse> {
    record(&state, "echo", &request);
    Json(RpcResponse {
        result: echo(request.message),
    })
}

/// POST /rpc/upper-case
pub async fn upper_case_handler(
    State(state): State<RpcState>,
    Json(request): Json<RpcRequest>,
) -> Json<RpcResponse> {
    record(&state, "upper_case", &request);
    Json(RpcResponse {
        result: upper_case(request.message),
    })
}

fn record(state: &RpcState, method: &str, request: &RpcRequest) {
    log::debug!("RPC {method} called");
    state.metrics.call_received(method);
    if request.message.is_none() {
        state.metrics.empty_message(method);
    }
}
