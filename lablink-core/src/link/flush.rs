//! Startup flush
//!
//! Boards print banners and prompts while booting. Before the first real
//! command, drain whole lines until the port stays quiet for one per-line
//! budget or the total budget is spent, whichever comes first. Silence is
//! the success signal.

use core::time::Duration;

use lablink_hal::{MonotonicClock, SerialRx};
use tracing::debug;

use crate::link::deadline::Deadline;
use crate::link::reader::LineReader;

/// Drain stale lines from `port`
///
/// Returns the number of lines discarded. Never runs longer than `total`
/// plus one clock poll.
pub fn flush_startup<P, C>(port: &mut P, clock: &C, total: Duration, per_line: Duration) -> usize
where
    P: SerialRx + ?Sized,
    C: MonotonicClock + ?Sized,
{
    let deadline = Deadline::start(clock, total);
    let mut reader = LineReader::new(port, clock);
    let mut discarded = 0;

    loop {
        let remaining = deadline.remaining(clock.now());
        if remaining.is_zero() {
            debug!(discarded, "startup flush budget spent");
            break;
        }

        match reader.read_line(per_line.min(remaining)) {
            Ok(line) => {
                debug!(line = %line, "discarding startup line");
                discarded += 1;
            }
            Err(_) => break,
        }
    }

    discarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use lablink_hal::mock::{MockClock, MockSerial};

    const MS: Duration = Duration::from_millis(1);

    fn port(clock: &MockClock) -> MockSerial {
        MockSerial::new(clock.clone()).with_poll_step(MS)
    }

    #[test]
    fn test_quiet_port_stops_after_one_line_budget() {
        let clock = MockClock::new();
        let mut port = port(&clock);

        let discarded = flush_startup(&mut port, &clock, 2000 * MS, 50 * MS);
        assert_eq!(discarded, 0);
        assert!(clock.now() <= 52 * MS);
    }

    #[test]
    fn test_drains_banner_lines() {
        let clock = MockClock::new();
        let mut port = port(&clock);
        port.queue("Lab board v1\r\nready\r\n> \n");

        let discarded = flush_startup(&mut port, &clock, 2000 * MS, 50 * MS);
        assert_eq!(discarded, 3);
        assert_eq!(port.unread(), 0);
    }

    #[test]
    fn test_total_budget_bounds_chatty_board() {
        let clock = MockClock::new();
        let mut port = port(&clock);
        // A new line every 10 ms for a full second
        for i in 0..100u32 {
            port.queue_at(i * 10 * MS, "tick\n");
        }

        let discarded = flush_startup(&mut port, &clock, 200 * MS, 50 * MS);
        assert!(discarded > 0);
        assert!(clock.now() <= 202 * MS);
        assert!(port.unread() > 0);
    }

    #[test]
    fn test_later_lines_are_left_for_commands() {
        let clock = MockClock::new();
        let mut port = port(&clock);
        port.queue("boot\n");
        port.queue_at(500 * MS, "A 1 5 7\n");

        let discarded = flush_startup(&mut port, &clock, 2000 * MS, 50 * MS);
        assert_eq!(discarded, 1);

        let line: String = LineReader::new(&mut port, &clock).read_line(1000 * MS).unwrap();
        assert_eq!(line, "A 1 5 7");
    }

    #[test]
    fn test_zero_total_budget_does_nothing() {
        let clock = MockClock::new();
        let mut port = port(&clock);
        port.queue("boot\n");

        assert_eq!(flush_startup(&mut port, &clock, Duration::ZERO, Duration::ZERO), 0);
        assert_eq!(port.read_attempts(), 0);
    }
}
