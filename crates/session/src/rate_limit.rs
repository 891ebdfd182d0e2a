//! Send rate limiting

use std::time::{Duration, Instant};

/// Spaces events at least `interval` apart
///
/// The clock starts at construction, so the first event is allowed once a
/// full interval has passed.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval: Duration,
    last: Instant,
}

impl RateLimiter {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last: start,
        }
    }

    /// Check whether an event may fire at `now`
    #[inline]
    pub fn is_ready(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last) >= self.interval
    }

    /// Fire if ready, restarting the interval at `now`
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last = now;
        true
    }

    /// When the last event fired (or the limiter was created)
    #[inline]
    pub fn last(&self) -> Instant {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(200);

    #[test]
    fn test_not_ready_before_interval() {
        let start = Instant::now();
        let mut limiter = RateLimiter::new(INTERVAL, start);

        assert!(!limiter.try_acquire(start));
        assert!(!limiter.try_acquire(start + Duration::from_millis(199)));
        assert_eq!(limiter.last(), start);
    }

    #[test]
    fn test_ready_at_exact_boundary() {
        let start = Instant::now();
        let mut limiter = RateLimiter::new(INTERVAL, start);

        let first = start + INTERVAL;
        assert!(limiter.try_acquire(first));
        assert_eq!(limiter.last(), first);

        assert!(!limiter.try_acquire(first + Duration::from_millis(100)));
        assert!(limiter.try_acquire(first + INTERVAL));
    }

    #[test]
    fn test_late_frame_restarts_interval() {
        let start = Instant::now();
        let mut limiter = RateLimiter::new(INTERVAL, start);

        let late = start + Duration::from_millis(350);
        assert!(limiter.try_acquire(late));
        // Next window is measured from the late frame, not from 200 ms
        assert!(!limiter.is_ready(start + Duration::from_millis(400)));
        assert!(limiter.is_ready(late + INTERVAL));
    }

    #[test]
    fn test_clock_before_start() {
        let start = Instant::now() + Duration::from_secs(1);
        let limiter = RateLimiter::new(INTERVAL, start);
        assert!(!limiter.is_ready(start - Duration::from_millis(500)));
    }

    #[test]
    fn test_zero_interval_always_ready() {
        let start = Instant::now();
        let mut limiter = RateLimiter::new(Duration::ZERO, start);
        assert!(limiter.try_acquire(start));
        assert!(limiter.try_acquire(start));
    }
}
