use crate::RpcState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

/// GET /health - service identity and uptime
pub async fn health(State(state): State<RpcState>) -> Response {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0);

    let health = json!({
        "status": "healthy",
        "service": &*state.service_name,
        "version": env!("CARGO_PKG_VERSION"),
        "started_at": state.started_at.to_rfc3339(),
        "uptime_secs": uptime_secs,
        "timestamp": Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe
pub async fn readiness() -> Response {
    // The listener only exists while the service is Running
    (StatusCode::OK, "Ready").into_response()
}
