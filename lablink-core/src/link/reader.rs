//! Deadline-bounded line reader
//!
//! Polls the port one byte at a time until a newline arrives or the
//! budget runs out. A line cut off by the deadline is dropped; half a
//! line is never returned.

use alloc::string::String;
use core::time::Duration;

use lablink_hal::{MonotonicClock, SerialRx};
use lablink_protocol::LineAssembler;
use tracing::{trace, warn};

use crate::error::LinkError;
use crate::link::deadline::Deadline;

/// Reads newline-terminated lines from a borrowed port
pub struct LineReader<'a, P: ?Sized, C: ?Sized> {
    port: &'a mut P,
    clock: &'a C,
}

impl<'a, P, C> LineReader<'a, P, C>
where
    P: SerialRx + ?Sized,
    C: MonotonicClock + ?Sized,
{
    pub fn new(port: &'a mut P, clock: &'a C) -> Self {
        Self { port, clock }
    }

    /// Read one line, waiting at most `budget`
    ///
    /// At least one read attempt is made even with a zero budget. Read
    /// errors are treated as "nothing available" and reported once per call.
    pub fn read_line(&mut self, budget: Duration) -> Result<String, LinkError> {
        let deadline = Deadline::start(self.clock, budget);
        let mut assembler = LineAssembler::new();
        let mut error_reported = false;

        loop {
            if deadline.has_passed(self.clock.now()) {
                if assembler.pending() > 0 {
                    trace!(bytes = assembler.pending(), "partial line dropped at deadline");
                }
                return Err(LinkError::Timeout);
            }

            match self.port.read_byte() {
                Ok(Some(byte)) => {
                    if let Some(line) = assembler.feed(byte) {
                        return Ok(line);
                    }
                }
                Ok(None) => self.clock.relax(),
                Err(e) => {
                    if !error_reported {
                        warn!(error = ?e, "serial read failed");
                        error_reported = true;
                    }
                    self.clock.relax();
                }
            }
        }
    }
}
