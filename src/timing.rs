use std::time::{Duration, Instant};

/// Wall-clock duration of one measured call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimingSample {
    elapsed: Duration,
}

impl TimingSample {
    pub fn new(start: Instant, end: Instant) -> Self {
        Self {
            elapsed: end.saturating_duration_since(start),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whole microseconds, truncated.
    pub fn micros(&self) -> u128 {
        self.elapsed.as_micros()
    }
}

/// Runs `f` and returns its result with the time it took.
pub fn time_it<T>(f: impl FnOnce() -> T) -> (T, TimingSample) {
    let start = Instant::now();
    let value = f();
    let end = Instant::now();
    (value, TimingSample::new(start, end))
}
