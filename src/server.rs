//! Listener startup and shutdown logic.
//!
//! This module contains the `HttpService` type which handles:
//! - Binding the heartbeat listener at the configured address and port
//! - Spawning the serve task with graceful shutdown support
//! - Idempotent stop with a short grace period for in-flight requests

use crate::config::HeartbeatConfig;
use crate::error::{AppError, AppResult};
use crate::routes;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Grace period for in-flight requests after a stop is requested.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// The heartbeat HTTP listener.
///
/// Owns the configuration, the shared handler state and, while running, the
/// serve task. `start` and `stop` are serialized through `&mut self`; `stop`
/// is idempotent and safe to call on a never-started service.
pub struct HttpService {
    config: HeartbeatConfig,
    state: Arc<AppState>,
    running: Option<RunningServer>,
}

struct RunningServer {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl HttpService {
    pub fn new(config: HeartbeatConfig, state: Arc<AppState>) -> Self {
        Self {
            config,
            state,
            running: None,
        }
    }

    pub fn config(&self) -> &HeartbeatConfig {
        &self.config
    }

    /// Bind the listener and start serving heartbeat requests.
    ///
    /// Returns the bound address, which differs from the configured one when
    /// port 0 was requested. A bind failure (port in use, invalid address) is
    /// returned to the caller so startup can be aborted cleanly.
    pub async fn start(&mut self) -> AppResult<SocketAddr> {
        if let Some(running) = &self.running {
            warn!(
                "Heartbeat HTTP server is already running on {}",
                running.local_addr
            );
            return Ok(running.local_addr);
        }

        info!("Initializing heartbeat HTTP service");

        let addr = format!("{}:{}", self.config.bind_address, self.config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| AppError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        let app = routes::create_router(self.state.clone(), &self.config.path);

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    // Resolves on a stop signal, or immediately if the
                    // sender was dropped without one.
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                error!("Heartbeat HTTP server error: {}", e);
            }
        });

        self.running = Some(RunningServer {
            local_addr,
            shutdown,
            task,
        });

        info!(
            "Heartbeat HTTP service started on address '{}' and port '{}' for path '{}'",
            self.config.bind_address,
            local_addr.port(),
            self.config.path
        );
        Ok(local_addr)
    }

    /// Stop the listener, allowing in-flight requests a short grace period.
    ///
    /// Stopping an already-stopped or never-started service is a no-op.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            info!("Heartbeat HTTP server is not running");
            return;
        };

        let _ = running.shutdown.send(());

        let mut task = running.task;
        if tokio::time::timeout(SHUTDOWN_GRACE, &mut task).await.is_err() {
            warn!(
                "Heartbeat HTTP server did not stop within {:?}, aborting",
                SHUTDOWN_GRACE
            );
            task.abort();
        }

        info!("Stopped heartbeat HTTP server");
    }
}
