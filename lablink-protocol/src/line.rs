//! Newline framing
//!
//! Bytes arrive one at a time with no flow control. The assembler collects
//! them until `\n` and hands back the finished line. Carriage returns and
//! NUL bytes are dropped. There is no length cap.

use alloc::string::String;
use alloc::vec::Vec;

/// Line terminator
pub const NEWLINE: u8 = b'\n';

/// Tolerated before the terminator and stripped
pub const CARRIAGE_RETURN: u8 = b'\r';

/// Byte-at-a-time line builder
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    buffer: Vec<u8>,
}

impl LineAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes held for the current partial line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte
    ///
    /// Returns `Some(line)` when `byte` completes a line, `None` otherwise.
    /// Invalid UTF-8 is replaced rather than rejected; such lines can never
    /// start with the acknowledgement marker anyway.
    pub fn feed(&mut self, byte: u8) -> Option<String> {
        match byte {
            NEWLINE => {
                let line = String::from_utf8_lossy(&self.buffer).into_owned();
                self.buffer.clear();
                Some(line)
            }
            CARRIAGE_RETURN | 0 => None,
            other => {
                self.buffer.push(other);
                None
            }
        }
    }
}
