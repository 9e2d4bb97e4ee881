//! Scripted test doubles
//!
//! [`MockClock`] is a manually advanced monotonic clock shared by handle.
//! [`MockSerial`] replays scripted bytes at scheduled clock times, records
//! everything written to it, and can answer each written line through a
//! responder closure the way a lab board would.
//!
//! Every read attempt on [`MockSerial`] advances the shared clock by a fixed
//! poll step, so busy-poll loops in the code under test make progress in
//! virtual time and terminate deterministically.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::time::Duration;

use crate::serial::{SerialRx, SerialTx};
use crate::time::MonotonicClock;

/// Clock advance applied on every read attempt
pub const DEFAULT_POLL_STEP: Duration = Duration::from_micros(100);

/// Manually advanced clock
///
/// Clones share the same time value.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now: Rc<Cell<Duration>>,
}

impl MockClock {
    /// Create a clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an absolute time
    pub fn set(&self, at: Duration) {
        self.now.set(at);
    }
}

impl MonotonicClock for MockClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Errors reported by [`MockSerial`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockSerialError {
    /// Writes were configured to fail
    WriteRejected,
    /// Reads were configured to fail
    ReadRejected,
}

/// Answers a written request line (without its newline)
pub type Responder = Box<dyn FnMut(&str) -> Option<String>>;

/// Scripted serial port
pub struct MockSerial {
    clock: MockClock,
    poll_step: Duration,
    incoming: VecDeque<(Duration, u8)>,
    pending_tx: Vec<u8>,
    written: Vec<u8>,
    responder: Option<Responder>,
    reply_delay: Duration,
    read_attempts: usize,
    fail_writes: bool,
    fail_reads: bool,
}

impl MockSerial {
    /// Create a port driven by `clock`
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            poll_step: DEFAULT_POLL_STEP,
            incoming: VecDeque::new(),
            pending_tx: Vec::new(),
            written: Vec::new(),
            responder: None,
            reply_delay: Duration::ZERO,
            read_attempts: 0,
            fail_writes: false,
            fail_reads: false,
        }
    }

    /// Set the clock advance applied on every read attempt
    pub fn with_poll_step(mut self, step: Duration) -> Self {
        self.poll_step = step;
        self
    }

    /// Answer each written line with the closure's reply, if any
    pub fn with_responder(mut self, responder: impl FnMut(&str) -> Option<String> + 'static) -> Self {
        self.responder = Some(Box::new(responder));
        self
    }

    /// Delay between a request being written and its reply becoming readable
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    /// Make bytes readable right away
    pub fn queue(&mut self, text: &str) {
        let at = self.clock.now();
        self.queue_at(at, text);
    }

    /// Make bytes readable once the clock reaches `at`
    pub fn queue_at(&mut self, at: Duration, text: &str) {
        self.incoming.extend(text.bytes().map(|b| (at, b)));
    }

    /// Make subsequent writes fail
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make subsequent reads fail
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Everything written so far
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Written bytes split into lines (newline removed)
    pub fn written_lines(&self) -> Vec<String> {
        self.written
            .split(|&b| b == b'\n')
            .filter(|line| !line.is_empty())
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    /// Number of bytes scripted but not yet read
    pub fn unread(&self) -> usize {
        self.incoming.len()
    }

    /// Number of read calls made so far
    pub fn read_attempts(&self) -> usize {
        self.read_attempts
    }

    fn dispatch_requests(&mut self) {
        while let Some(pos) = self.pending_tx.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending_tx.drain(..=pos).collect();
            let request = String::from_utf8_lossy(&line[..pos]).into_owned();

            let reply = match self.responder.as_mut() {
                Some(responder) => responder(&request),
                None => None,
            };

            if let Some(reply) = reply {
                let at = self.clock.now() + self.reply_delay;
                self.queue_at(at, &reply);
            }
        }
    }
}

impl SerialTx for MockSerial {
    type Error = MockSerialError;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MockSerialError::WriteRejected);
        }
        self.written.extend_from_slice(data);
        self.pending_tx.extend_from_slice(data);
        self.dispatch_requests();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SerialRx for MockSerial {
    type Error = MockSerialError;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.read_attempts += 1;
        let now = self.clock.now();
        self.clock.advance(self.poll_step);

        if self.fail_reads {
            return Err(MockSerialError::ReadRejected);
        }

        let mut count = 0;
        while count < buf.len() {
            match self.incoming.front() {
                Some(&(at, byte)) if at <= now => {
                    buf[count] = byte;
                    count += 1;
                    self.incoming.pop_front();
                }
                _ => break,
            }
        }
        Ok(count)
    }
}
