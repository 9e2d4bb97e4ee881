//! Board-agnostic link logic for Lablink hosts
//!
//! This crate contains everything between the serial port and the
//! application that does not depend on a particular transport:
//!
//! - Deadline-bounded line reading and startup flushing
//! - The GET/SET command channel with reply matching
//! - Software debouncing of digital inputs
//! - Analog percent and accelerometer scaling
//! - Link configuration and the [`LabClient`] facade
//!
//! Everything is synchronous. Each call either completes or fails once
//! its deadline passes; nothing runs in the background.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod link;

pub use client::LabClient;
pub use config::{AccelChannels, ConfigError, LinkConfig};
pub use error::LinkError;
pub use input::{Acceleration, DebounceFilter};
pub use link::{CommandChannel, Deadline, LineReader, LinkStats};
