use crate::metrics::HeartbeatMeter;
use crate::readiness::ReadinessProvider;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// This struct is wrapped in `Arc` and shared across all request handlers
/// via Axum's State extraction.
pub struct AppState {
    /// Readiness query for the monitored application
    pub readiness: Arc<dyn ReadinessProvider>,

    /// Counter for served heartbeat requests
    pub meter: HeartbeatMeter,
}

impl AppState {
    pub fn new(readiness: Arc<dyn ReadinessProvider>) -> Self {
        Self {
            readiness,
            meter: HeartbeatMeter::default(),
        }
    }
}
