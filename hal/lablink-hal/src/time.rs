//! Monotonic time source

use core::time::Duration;

/// Monotonic clock
///
/// `now` is measured from an arbitrary, fixed epoch and never goes
/// backwards. Deadlines are computed by subtracting two readings.
pub trait MonotonicClock {
    /// Time since the clock's epoch
    fn now(&self) -> Duration;

    /// Called between unsuccessful read attempts in busy-poll loops
    ///
    /// The default does nothing. Host clocks may yield the thread here;
    /// the pause must stay short compared to any deadline.
    fn relax(&self) {}
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn relax(&self) {
        (**self).relax()
    }
}
