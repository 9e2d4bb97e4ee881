//! System monotonic clock

use std::thread;
use std::time::{Duration, Instant};

use lablink_hal::MonotonicClock;

/// Monotonic time since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for StdClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn relax(&self) {
        thread::yield_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_goes_backwards() {
        let clock = StdClock::new();
        let mut last = clock.now();
        for _ in 0..1000 {
            let now = clock.now();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_tracks_sleep() {
        let clock = StdClock::new();
        thread::sleep(Duration::from_millis(5));
        assert!(clock.now() >= Duration::from_millis(5));
    }
}
