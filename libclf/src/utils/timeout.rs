//! Timing defaults for the connect loop and listen calls.

use std::time::{Duration, Instant};

/// Listen timeout used when options do not name one.
pub const DEFAULT_LISTEN_TIMEOUT_MS: u64 = 1000;

/// Pause between two reader iterations, measured from the start of the
/// previous attempt.
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

pub fn default_listen_timeout() -> Duration {
    ms(DEFAULT_LISTEN_TIMEOUT_MS)
}

pub fn default_interval() -> Duration {
    ms(DEFAULT_INTERVAL_MS)
}

/// Part of `interval` not yet consumed since `started`; zero once the
/// attempt took longer than the interval.
pub fn remaining(interval: Duration, started: Instant) -> Duration {
    interval.saturating_sub(started.elapsed())
}

/// Convert fractional seconds from a configuration document. Negative and
/// non-finite values are rejected.
pub fn secs_f64(secs: f64) -> Option<Duration> {
    if secs.is_finite() && secs >= 0.0 {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}
