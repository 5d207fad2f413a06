use std::sync::Mutex;

/// Counts pipeline runs; degraded runs are those that produced an empty
/// cleaned sequence.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    processed: usize,
    degraded: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                processed: 0,
                degraded: 0,
            }),
        }
    }

    pub fn record_processed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += 1;
        }
    }

    pub fn record_degraded(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.degraded += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.processed, metrics.degraded)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
