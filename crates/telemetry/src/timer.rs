use std::time::{Duration, Instant};

/// Measures one operation into the histogram named after the timer, in ms
///
/// Recorded once: on [`Timer::stop`], or on drop if the operation bailed out
/// early.
pub struct Timer {
    name: String,
    started: Instant,
    pending: bool,
}

impl Timer {
    /// Start timing
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started: Instant::now(),
            pending: true,
        }
    }

    /// Record and return the elapsed time
    pub fn stop(mut self) -> Duration {
        let elapsed = self.finish();
        tracing::debug!(metric = %self.name, elapsed_ms = elapsed.as_millis(), "Timer stopped");
        elapsed
    }

    fn finish(&mut self) -> Duration {
        let elapsed = self.started.elapsed();
        if std::mem::take(&mut self.pending) {
            crate::metrics().histogram(&self.name, elapsed.as_secs_f64() * 1000.0);
        }
        elapsed
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.finish();
    }
}
