//! GET/SET command channel
//!
//! One exchange at a time: write the request, then read lines until one
//! acknowledges it or the exchange deadline passes. Lines that are not
//! acknowledgements, do not parse, or repeat a different type/channel are
//! dropped and the wait continues. The read budget shrinks with every line,
//! so the exchange deadline and the line deadline are the same budget.

use core::time::Duration;

use lablink_hal::{MonotonicClock, Serial};
use lablink_protocol::{Ack, Command, IoType};
use tracing::{debug, trace, warn};

use crate::error::LinkError;
use crate::link::deadline::Deadline;
use crate::link::flush::flush_startup;
use crate::link::reader::LineReader;

/// Running exchange counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Requests written
    pub exchanges: u32,
    /// Requests that got a matching acknowledgement
    pub completed: u32,
    /// Requests that ran out of time
    pub timeouts: u32,
    /// Noise, malformed and mismatched lines dropped during exchanges
    pub discarded_lines: u32,
    /// Lines drained by the startup flush
    pub flushed_lines: u32,
}

/// Owns the port and runs request/acknowledgement exchanges on it
///
/// Callers must not start a second exchange before the first one returns;
/// replies carry no sequence number.
pub struct CommandChannel<P, C> {
    port: P,
    clock: C,
    verify_set_echo: bool,
    stats: LinkStats,
}

impl<P, C> CommandChannel<P, C>
where
    P: Serial,
    C: MonotonicClock,
{
    /// Create a channel over an opened port
    pub fn new(port: P, clock: C) -> Self {
        Self {
            port,
            clock,
            verify_set_echo: false,
            stats: LinkStats::default(),
        }
    }

    /// Require SET acknowledgements to echo the requested value
    pub fn with_set_echo_check(mut self, verify: bool) -> Self {
        self.verify_set_echo = verify;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Drain boot text; see [`flush_startup`]
    pub fn flush_startup(&mut self, total: Duration, per_line: Duration) -> usize {
        let discarded = flush_startup(&mut self.port, &self.clock, total, per_line);
        let flushed = u32::try_from(discarded).unwrap_or(u32::MAX);
        self.stats.flushed_lines = self.stats.flushed_lines.saturating_add(flushed);
        discarded
    }

    /// Read a value
    pub fn get(&mut self, io_type: IoType, channel: u16, timeout: Duration) -> Result<i32, LinkError> {
        self.exchange(&Command::get(io_type, channel), timeout)
            .map(|ack| ack.value)
    }

    /// Write a value
    pub fn set(
        &mut self,
        io_type: IoType,
        channel: u16,
        value: i32,
        timeout: Duration,
    ) -> Result<(), LinkError> {
        self.exchange(&Command::set(io_type, channel, value), timeout)
            .map(|_| ())
    }

    /// Send `command` and wait for its acknowledgement
    pub fn exchange(&mut self, command: &Command, timeout: Duration) -> Result<Ack, LinkError> {
        let request = command.encode()?;

        trace!(request = request.trim_end(), "sending");
        if let Err(e) = self.port.write_all(request.as_bytes()) {
            warn!(error = ?e, "request write failed");
        } else if let Err(e) = self.port.flush() {
            warn!(error = ?e, "request flush failed");
        }
        self.stats.exchanges = self.stats.exchanges.wrapping_add(1);

        let deadline = Deadline::start(&self.clock, timeout);

        loop {
            let remaining = deadline.remaining(self.clock.now());
            if remaining.is_zero() {
                return Err(self.timed_out(command));
            }

            let read = LineReader::new(&mut self.port, &self.clock).read_line(remaining);
            let line = match read {
                Ok(line) => line,
                Err(_) => return Err(self.timed_out(command)),
            };

            match Ack::parse(&line) {
                Ok(ack) if self.accepts(&ack, command) => {
                    trace!(reply = %line, "acknowledged");
                    self.stats.completed = self.stats.completed.wrapping_add(1);
                    return Ok(ack);
                }
                Ok(_) => debug!(reply = %line, "dropping acknowledgement for another request"),
                Err(reason) => debug!(line = %line, %reason, "dropping noise line"),
            }
            self.stats.discarded_lines = self.stats.discarded_lines.wrapping_add(1);
        }
    }

    fn accepts(&self, ack: &Ack, command: &Command) -> bool {
        if self.verify_set_echo {
            ack.confirms(command)
        } else {
            ack.answers(command)
        }
    }

    fn timed_out(&mut self, command: &Command) -> LinkError {
        self.stats.timeouts = self.stats.timeouts.wrapping_add(1);
        warn!(
            verb = %command.kind().verb(),
            io_type = command.io_type().to_raw(),
            channel = command.channel(),
            "exchange timed out"
        );
        LinkError::Timeout
    }
}
