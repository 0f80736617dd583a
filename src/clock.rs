//! Monotonic clock used for every timed section of the harness.

use std::time::Instant;

/// Monotonic time source with nanosecond resolution (floored by the platform).
///
/// Readings come from [`Instant`], never from the wall clock. A delta that would
/// go backwards is clamped to zero; the clock itself never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clock;

impl Clock {
    #[inline]
    pub fn now() -> Instant {
        Instant::now()
    }

    /// Nanoseconds elapsed since `start`, saturating at `u64::MAX`.
    #[inline]
    pub fn elapsed_nanos(start: Instant) -> u64 {
        Self::nanos_between(start, Instant::now())
    }

    /// Nanoseconds from `start` to `end`; zero if `end` precedes `start`.
    pub fn nanos_between(start: Instant, end: Instant) -> u64 {
        if end < start {
            tracing::trace!("clock went backwards, clamping delta to zero");
            return 0;
        }
        let nanos = end.duration_since(start).as_nanos();
        u64::try_from(nanos).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_elapsed_tracks_sleep() {
        let start = Clock::now();
        thread::sleep(Duration::from_millis(2));
        let elapsed = Clock::elapsed_nanos(start);
        assert!(elapsed >= 1_800_000, "elapsed {elapsed} < 1.8ms");
    }

    #[test]
    fn test_reversed_readings_clamp_to_zero() {
        let earlier = Clock::now();
        thread::sleep(Duration::from_micros(50));
        let later = Clock::now();

        assert_eq!(Clock::nanos_between(later, earlier), 0);
        assert!(Clock::nanos_between(earlier, later) > 0);
    }

    #[test]
    fn test_same_reading_is_zero() {
        let t = Clock::now();
        assert_eq!(Clock::nanos_between(t, t), 0);
    }
}
