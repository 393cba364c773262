use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::debug;

use super::AppState;

/// Heartbeat endpoint answering load-balancer health checks.
///
/// Marks the request meter and responds 200 while the monitored application
/// is ready, 503 otherwise. The body is empty in both cases.
pub async fn heartbeat(State(state): State<Arc<AppState>>) -> StatusCode {
    state.meter.mark();

    let status = if state.readiness.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    debug!("Heartbeat request answered with status {}", status);
    status
}
