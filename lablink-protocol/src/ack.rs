//! Board → host acknowledgements
//!
//! Reply format: `A <type> <channel> <value>`
//!
//! Parsing is whitespace-delimited and lenient about trailing text the same
//! way a stream extraction is: each field is an optionally signed run of
//! digits, and anything after the value is ignored.

use core::fmt;

use crate::command::{Command, IoType};

/// First character of every acknowledgement line
pub const ACK_MARKER: char = 'A';

/// Reasons a line is not a usable acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AckError {
    /// Line is empty
    Empty,
    /// Line does not start with the acknowledgement marker
    NotAck,
    /// Type, channel or value is missing or not an integer
    InvalidField,
}

impl fmt::Display for AckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AckError::Empty => f.write_str("empty line"),
            AckError::NotAck => f.write_str("line is not an acknowledgement"),
            AckError::InvalidField => f.write_str("acknowledgement field is not an integer"),
        }
    }
}

/// A parsed acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ack {
    /// Echoed I/O type
    pub io_type: IoType,
    /// Echoed channel (kept signed; a negative channel simply never matches)
    pub channel: i32,
    /// Reported or echoed value
    pub value: i32,
}

impl Ack {
    /// Parse a line (already stripped of `\r` and `\n`)
    pub fn parse(line: &str) -> Result<Self, AckError> {
        let mut chars = line.chars();
        match chars.next() {
            None => return Err(AckError::Empty),
            Some(ACK_MARKER) => {}
            Some(_) => return Err(AckError::NotAck),
        }

        let mut fields = FieldScanner::new(chars.as_str());
        let io_type = fields.next_int()?;
        let channel = fields.next_int()?;
        let value = fields.next_int()?;

        Ok(Self {
            io_type: IoType::from_raw(io_type),
            channel,
            value,
        })
    }

    /// Check whether this acknowledgement answers `command`
    ///
    /// Type and channel must both match. The value is not compared.
    pub fn answers(&self, command: &Command) -> bool {
        self.io_type.to_raw() == command.io_type().to_raw()
            && self.channel == i32::from(command.channel())
    }

    /// Check whether this acknowledgement answers `command` and, for a SET,
    /// echoes the requested value
    pub fn confirms(&self, command: &Command) -> bool {
        self.answers(command) && command.value().map_or(true, |v| v == self.value)
    }
}

/// Pulls optionally signed decimal integers out of a text slice
struct FieldScanner<'a> {
    rest: &'a str,
}

impl<'a> FieldScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn next_int(&mut self) -> Result<i32, AckError> {
        let text = self.rest.trim_start();
        let bytes = text.as_bytes();

        let mut end = 0;
        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            end = 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == digits_start {
            return Err(AckError::InvalidField);
        }

        let value = text[..end]
            .parse::<i32>()
            .map_err(|_| AckError::InvalidField)?;
        self.rest = &text[end..];
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ack() {
        let ack = Ack::parse("A 1 5 2048").unwrap();
        assert_eq!(ack.io_type, IoType::Analog);
        assert_eq!(ack.channel, 5);
        assert_eq!(ack.value, 2048);
    }

    #[test]
    fn test_parse_extra_whitespace() {
        let ack = Ack::parse("A\t2  10   90 ").unwrap();
        assert_eq!(ack.io_type, IoType::Servo);
        assert_eq!(ack.channel, 10);
        assert_eq!(ack.value, 90);
    }

    #[test]
    fn test_marker_may_touch_first_field() {
        let ack = Ack::parse("A0 33 1").unwrap();
        assert_eq!(ack.io_type, IoType::Digital);
        assert_eq!(ack.channel, 33);
    }

    #[test]
    fn test_trailing_text_ignored() {
        let ack = Ack::parse("A 1 5 2048 extra").unwrap();
        assert_eq!(ack.value, 2048);

        let ack = Ack::parse("A 1 5 2048xyz").unwrap();
        assert_eq!(ack.value, 2048);
    }

    #[test]
    fn test_signed_fields() {
        let ack = Ack::parse("A 2 10 -45").unwrap();
        assert_eq!(ack.value, -45);
        let ack = Ack::parse("A +1 -3 +7").unwrap();
        assert_eq!(ack.io_type, IoType::Analog);
        assert_eq!(ack.channel, -3);
        assert_eq!(ack.value, 7);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(Ack::parse(""), Err(AckError::Empty));
    }

    #[test]
    fn test_not_an_ack() {
        assert_eq!(Ack::parse("XYZ"), Err(AckError::NotAck));
        assert_eq!(Ack::parse(" A 1 5 2048"), Err(AckError::NotAck));
        assert_eq!(Ack::parse("a 1 5 2048"), Err(AckError::NotAck));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(Ack::parse("A"), Err(AckError::InvalidField));
        assert_eq!(Ack::parse("A 1 5"), Err(AckError::InvalidField));
        assert_eq!(Ack::parse("A 1 x 5"), Err(AckError::InvalidField));
        assert_eq!(Ack::parse("A 1 5x 2048"), Err(AckError::InvalidField));
        assert_eq!(Ack::parse("A - 5 2048"), Err(AckError::InvalidField));
    }

    #[test]
    fn test_overflow_is_invalid() {
        assert_eq!(Ack::parse("A 1 5 99999999999"), Err(AckError::InvalidField));
    }

    #[test]
    fn test_answers_matches_type_and_channel() {
        let cmd = Command::get(IoType::Analog, 5);
        assert!(Ack::parse("A 1 5 0").unwrap().answers(&cmd));
        assert!(!Ack::parse("A 0 5 0").unwrap().answers(&cmd));
        assert!(!Ack::parse("A 1 6 0").unwrap().answers(&cmd));
        assert!(!Ack::parse("A 1 -5 0").unwrap().answers(&cmd));
    }

    #[test]
    fn test_answers_unknown_type() {
        let cmd = Command::get(IoType::Other(9), 1);
        assert!(Ack::parse("A 9 1 0").unwrap().answers(&cmd));
    }

    #[test]
    fn test_confirms_checks_set_echo() {
        let cmd = Command::set(IoType::Servo, 10, 90);
        let ack = Ack::parse("A 2 10 45").unwrap();
        assert!(ack.answers(&cmd));
        assert!(!ack.confirms(&cmd));
        assert!(Ack::parse("A 2 10 90").unwrap().confirms(&cmd));

        // GET has no requested value to compare
        let get = Command::get(IoType::Servo, 10);
        assert!(ack.confirms(&get));
    }
}
