use std::sync::atomic::{AtomicBool, Ordering};

/// Readiness query consumed by the heartbeat handler.
///
/// Implementations report whether the monitored application has finished
/// starting. The flag is read on every heartbeat request, possibly from many
/// connections at once, so implementations must be cheap and thread-safe.
pub trait ReadinessProvider: Send + Sync {
    /// Returns true once the monitored application is fully started.
    fn is_ready(&self) -> bool;
}

/// Lock-free readiness flag backed by an `AtomicBool`.
///
/// Starts out not ready; the owner flips it with [`set_ready`](Self::set_ready)
/// as the application lifecycle progresses.
#[derive(Debug, Default)]
pub struct AtomicReadiness {
    ready: AtomicBool,
}

impl AtomicReadiness {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: AtomicBool::new(ready),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }
}

impl ReadinessProvider for AtomicReadiness {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}
