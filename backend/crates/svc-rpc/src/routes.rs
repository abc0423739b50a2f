use crate::{RpcState, handlers, health};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the RPC router with all endpoints
pub fn build_router(state: RpcState) -> Router {
    Router::new()
        // RPC methods
        .route("/rpc/echo", post(handlers::echo_handler))
        .route("/rpc/upper-case", post(handlers::upper_case_handler))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
