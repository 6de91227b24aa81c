//! At-most-once-per-interval gate for progress reporting.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lumen_math::round_up;

/// Fires at most once per interval.
///
/// The deadline advances by exactly one interval each time it fires, so a
/// long stall is followed by several quick reports rather than a reset.
#[derive(Debug, Clone, Copy)]
pub struct ProgressThrottle {
    next: SystemTime,
    interval: Duration,
}

impl ProgressThrottle {
    /// First deadline aligned to the next whole multiple of `interval` on the wall clock.
    pub fn aligned(interval: Duration) -> Self {
        let now = SystemTime::now();
        let since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or_default();
        let step = interval.as_millis().max(1) as f64;
        let aligned_ms = round_up(since_epoch.as_millis() as f64, step);
        Self::starting_at(UNIX_EPOCH + Duration::from_millis(aligned_ms as u64), interval)
    }

    /// First deadline at `next`.
    pub fn starting_at(next: SystemTime, interval: Duration) -> Self {
        Self { next, interval }
    }

    /// Report whether `now` is past the deadline, advancing it if so.
    pub fn ready(&mut self, now: SystemTime) -> bool {
        if now > self.next {
            self.next += self.interval;
            true
        } else {
            false
        }
    }
}
