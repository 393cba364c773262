use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter for served heartbeat requests.
///
/// Successor of the `http-heartbeat-meter` metric: no exporter, just an
/// atomic count that observability tooling (or tests) can read.
#[derive(Debug, Default)]
pub struct HeartbeatMeter {
    requests: AtomicU64,
}

impl HeartbeatMeter {
    /// Record one served heartbeat request.
    pub fn mark(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of heartbeat requests served so far.
    pub fn count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_counts_marks() {
        let meter = HeartbeatMeter::default();
        assert_eq!(meter.count(), 0);
        meter.mark();
        meter.mark();
        assert_eq!(meter.count(), 2);
    }
}
