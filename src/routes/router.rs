use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::heartbeat;
use super::AppState;

/// Create application router
///
/// Registers the heartbeat handler as a GET route at the configured path.
/// Other methods on that path are answered with 405 by the method router,
/// unmatched paths with 404.
pub fn create_router(state: Arc<AppState>, path: &str) -> axum::Router {
    // axum panics on route paths without a leading slash
    let route_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    axum::Router::new()
        .route(&route_path, get(heartbeat::heartbeat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
