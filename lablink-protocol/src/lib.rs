//! Lablink Wire Protocol
//!
//! This crate defines the text protocol spoken between the host and a lab
//! board. Every message is one line of ASCII terminated by `\n`; a `\r`
//! before the newline is tolerated and stripped.
//!
//! # Protocol Overview
//!
//! ```text
//! Host → Board:  G <type> <channel>\n
//!                S <type> <channel> <value>\n
//! Board → Host:  A <type> <channel> <value>\n
//! ```
//!
//! `type` is `0` (digital), `1` (analog) or `2` (servo). Other values are
//! carried through unchanged. Lines not starting with `A` are noise to the
//! host and are skipped by the caller.
//!
//! There is no sequence number: an acknowledgement belongs to the request
//! whose type and channel it repeats, so only one request may be in flight.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod ack;
pub mod command;
pub mod line;

pub use ack::{Ack, AckError, ACK_MARKER};
pub use command::{Command, CommandKind, IoType, ProtocolError, MAX_COMMAND_LEN};
pub use line::{LineAssembler, CARRIAGE_RETURN, NEWLINE};
