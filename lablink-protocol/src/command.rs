//! Host → board requests
//!
//! Request format:
//! - GET: `G <type> <channel>\n`
//! - SET: `S <type> <channel> <value>\n`
//!
//! Fields are decimal integers separated by a single space.

use core::fmt::{self, Write};
use core::str::FromStr;

use heapless::String;

/// Longest encoded request: `S -2147483648 65535 -2147483648\n` is 32 bytes
pub const MAX_COMMAND_LEN: usize = 40;

// Wire format values
const IO_DIGITAL: i32 = 0;
const IO_ANALOG: i32 = 1;
const IO_SERVO: i32 = 2;

const VERB_GET: char = 'G';
const VERB_SET: char = 'S';

/// Errors that can occur while building or encoding a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Encoded request does not fit the output buffer
    BufferTooSmall,
    /// I/O type name is neither a known name nor an integer
    UnknownIoType,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::BufferTooSmall => f.write_str("request does not fit the command buffer"),
            ProtocolError::UnknownIoType => {
                f.write_str("unknown I/O type (expected digital, analog, servo or an integer)")
            }
        }
    }
}

/// Kind of I/O point addressed by a request
///
/// Values outside the known set travel as [`IoType::Other`] so that boards
/// with extra I/O kinds still work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoType {
    /// Digital input or output (buttons, LEDs)
    Digital,
    /// Analog input (joystick, accelerometer, potentiometer)
    Analog,
    /// Servo output (angle in degrees)
    Servo,
    /// Any other type code
    Other(i32),
}

impl IoType {
    /// Parse from the wire integer
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            IO_DIGITAL => IoType::Digital,
            IO_ANALOG => IoType::Analog,
            IO_SERVO => IoType::Servo,
            other => IoType::Other(other),
        }
    }

    /// Convert to the wire integer
    pub fn to_raw(self) -> i32 {
        match self {
            IoType::Digital => IO_DIGITAL,
            IoType::Analog => IO_ANALOG,
            IoType::Servo => IO_SERVO,
            IoType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoType::Digital => f.write_str("digital"),
            IoType::Analog => f.write_str("analog"),
            IoType::Servo => f.write_str("servo"),
            IoType::Other(raw) => write!(f, "type {}", raw),
        }
    }
}

impl FromStr for IoType {
    type Err = ProtocolError;

    /// Accepts `digital`, `analog`, `servo` (any case) or a raw integer
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("digital") {
            Ok(IoType::Digital)
        } else if s.eq_ignore_ascii_case("analog") {
            Ok(IoType::Analog)
        } else if s.eq_ignore_ascii_case("servo") {
            Ok(IoType::Servo)
        } else {
            s.parse::<i32>()
                .map(IoType::from_raw)
                .map_err(|_| ProtocolError::UnknownIoType)
        }
    }
}

/// Request verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    Get,
    Set,
}

impl CommandKind {
    /// Wire verb character
    pub fn verb(self) -> char {
        match self {
            CommandKind::Get => VERB_GET,
            CommandKind::Set => VERB_SET,
        }
    }
}

/// A single request to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Read a value
    Get { io_type: IoType, channel: u16 },
    /// Write a value
    Set {
        io_type: IoType,
        channel: u16,
        value: i32,
    },
}

impl Command {
    /// Build a GET request
    pub fn get(io_type: IoType, channel: u16) -> Self {
        Command::Get { io_type, channel }
    }

    /// Build a SET request
    pub fn set(io_type: IoType, channel: u16, value: i32) -> Self {
        Command::Set {
            io_type,
            channel,
            value,
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Get { .. } => CommandKind::Get,
            Command::Set { .. } => CommandKind::Set,
        }
    }

    pub fn io_type(&self) -> IoType {
        match *self {
            Command::Get { io_type, .. } | Command::Set { io_type, .. } => io_type,
        }
    }

    pub fn channel(&self) -> u16 {
        match *self {
            Command::Get { channel, .. } | Command::Set { channel, .. } => channel,
        }
    }

    /// Requested value (SET only)
    pub fn value(&self) -> Option<i32> {
        match *self {
            Command::Get { .. } => None,
            Command::Set { value, .. } => Some(value),
        }
    }

    /// Encode this request as a newline-terminated line
    pub fn encode(&self) -> Result<String<MAX_COMMAND_LEN>, ProtocolError> {
        let mut line = String::new();
        let written = match *self {
            Command::Get { io_type, channel } => write!(
                line,
                "{} {} {}\n",
                VERB_GET,
                io_type.to_raw(),
                channel
            ),
            Command::Set {
                io_type,
                channel,
                value,
            } => write!(
                line,
                "{} {} {} {}\n",
                VERB_SET,
                io_type.to_raw(),
                channel,
                value
            ),
        };
        written.map_err(|_| ProtocolError::BufferTooSmall)?;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_get() {
        let line = Command::get(IoType::Analog, 5).encode().unwrap();
        assert_eq!(line.as_str(), "G 1 5\n");
    }

    #[test]
    fn test_encode_set() {
        let line = Command::set(IoType::Servo, 10, 90).encode().unwrap();
        assert_eq!(line.as_str(), "S 2 10 90\n");
    }

    #[test]
    fn test_encode_negative_value() {
        let line = Command::set(IoType::Digital, 39, -1).encode().unwrap();
        assert_eq!(line.as_str(), "S 0 39 -1\n");
    }

    #[test]
    fn test_longest_request_fits() {
        let line = Command::set(IoType::Other(i32::MIN), u16::MAX, i32::MIN)
            .encode()
            .unwrap();
        assert_eq!(line.len(), 32);
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_unknown_type_passes_through() {
        assert_eq!(IoType::from_raw(7), IoType::Other(7));
        assert_eq!(IoType::Other(7).to_raw(), 7);

        let line = Command::get(IoType::from_raw(7), 3).encode().unwrap();
        assert_eq!(line.as_str(), "G 7 3\n");
    }

    #[test]
    fn test_known_types_map_to_wire_codes() {
        assert_eq!(IoType::Digital.to_raw(), 0);
        assert_eq!(IoType::Analog.to_raw(), 1);
        assert_eq!(IoType::Servo.to_raw(), 2);
        assert_eq!(IoType::from_raw(2), IoType::Servo);
    }

    #[test]
    fn test_parse_type_names() {
        assert_eq!("digital".parse::<IoType>(), Ok(IoType::Digital));
        assert_eq!("ANALOG".parse::<IoType>(), Ok(IoType::Analog));
        assert_eq!(" servo ".parse::<IoType>(), Ok(IoType::Servo));
        assert_eq!("1".parse::<IoType>(), Ok(IoType::Analog));
        assert_eq!("12".parse::<IoType>(), Ok(IoType::Other(12)));
        assert_eq!("motor".parse::<IoType>(), Err(ProtocolError::UnknownIoType));
    }

    #[test]
    fn test_accessors() {
        let cmd = Command::set(IoType::Digital, 38, 1);
        assert_eq!(cmd.kind(), CommandKind::Set);
        assert_eq!(cmd.kind().verb(), 'S');
        assert_eq!(cmd.io_type(), IoType::Digital);
        assert_eq!(cmd.channel(), 38);
        assert_eq!(cmd.value(), Some(1));
        assert_eq!(Command::get(IoType::Digital, 38).value(), None);
    }
}
