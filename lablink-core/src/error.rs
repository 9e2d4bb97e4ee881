//! Link error kinds
//!
//! Noise, malformed replies and replies to other requests are not errors:
//! the command channel discards them and keeps waiting. Only deadline
//! exhaustion and a port that cannot be opened reach the caller.

use core::fmt;

use lablink_protocol::ProtocolError;

/// Errors crossing the link API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// No matching line arrived before the deadline
    ///
    /// Covers a silent board, a busy board and a slow transport alike.
    Timeout,
    /// The transport could not be opened; fatal to the session
    PortUnavailable,
    /// The request could not be encoded
    Protocol(ProtocolError),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Timeout => f.write_str("timed out waiting for a matching acknowledgement"),
            LinkError::PortUnavailable => f.write_str("serial port unavailable"),
            LinkError::Protocol(e) => write!(f, "protocol error: {}", e),
        }
    }
}

impl From<ProtocolError> for LinkError {
    fn from(e: ProtocolError) -> Self {
        LinkError::Protocol(e)
    }
}
