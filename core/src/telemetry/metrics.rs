use std::sync::Mutex;

/// Counts finished operations and failures across a driver run.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    processed: usize,
    errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                processed: 0,
                errors: 0,
            }),
        }
    }

    pub fn record_processed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn record_outcome<T, E>(&self, outcome: &Result<T, E>) {
        match outcome {
            Ok(_) => self.record_processed(),
            Err(_) => self.record_error(),
        }
    }

    /// `(processed, errors)`
    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.processed, metrics.errors)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_are_counted_separately() {
        let metrics = MetricsRecorder::new();
        metrics.record_outcome::<(), ()>(&Ok(()));
        metrics.record_outcome::<(), ()>(&Ok(()));
        metrics.record_outcome::<(), ()>(&Err(()));
        assert_eq!(metrics.snapshot(), (2, 1));
    }
}
