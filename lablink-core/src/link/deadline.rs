//! Exchange deadlines
//!
//! A deadline is a start reading of the monotonic clock plus a budget.
//! It never pauses or extends; once it has passed, the operation that
//! owns it makes no further attempts.

use core::time::Duration;

use lablink_hal::MonotonicClock;

/// Start instant plus budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    start: Duration,
    budget: Duration,
}

impl Deadline {
    /// Start a deadline now
    pub fn start<C: MonotonicClock + ?Sized>(clock: &C, budget: Duration) -> Self {
        Self::starting_at(clock.now(), budget)
    }

    /// Start a deadline at a given clock reading
    pub fn starting_at(start: Duration, budget: Duration) -> Self {
        Self { start, budget }
    }

    /// Time since the deadline started
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.start)
    }

    /// True once strictly more than the budget has elapsed
    pub fn has_passed(&self, now: Duration) -> bool {
        self.elapsed(now) > self.budget
    }

    /// Budget left, zero once used up
    pub fn remaining(&self, now: Duration) -> Duration {
        self.budget.saturating_sub(self.elapsed(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_remaining_shrinks() {
        let deadline = Deadline::starting_at(10 * MS, 100 * MS);
        assert_eq!(deadline.remaining(10 * MS), 100 * MS);
        assert_eq!(deadline.remaining(60 * MS), 50 * MS);
        assert_eq!(deadline.remaining(110 * MS), Duration::ZERO);
        assert_eq!(deadline.remaining(500 * MS), Duration::ZERO);
    }

    #[test]
    fn test_has_passed_is_strict() {
        let deadline = Deadline::starting_at(Duration::ZERO, 100 * MS);
        assert!(!deadline.has_passed(100 * MS));
        assert!(deadline.has_passed(101 * MS));
    }

    #[test]
    fn test_clock_before_start_counts_as_zero() {
        let deadline = Deadline::starting_at(50 * MS, 10 * MS);
        assert_eq!(deadline.elapsed(20 * MS), Duration::ZERO);
        assert!(!deadline.has_passed(20 * MS));
    }

    #[test]
    fn test_zero_budget() {
        let deadline = Deadline::starting_at(5 * MS, Duration::ZERO);
        assert_eq!(deadline.remaining(5 * MS), Duration::ZERO);
        assert!(!deadline.has_passed(5 * MS));
        assert!(deadline.has_passed(6 * MS));
    }
}
