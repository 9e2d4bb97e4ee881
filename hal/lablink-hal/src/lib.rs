//! Lablink Hardware Abstraction Layer
//!
//! This crate defines the capabilities the link core needs from the
//! outside world: a duplex byte channel to the lab board and a monotonic
//! clock. The host crate implements them on top of a real serial port;
//! tests implement them with the scripted doubles in [`mock`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (lablink-host, demos)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lablink-core (protocol engine)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lablink-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ serialport +  │       │ MockSerial +  │
//! │ std::time     │       │ MockClock     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialTx`], [`serial::SerialRx`] - Serial communication
//! - [`time::MonotonicClock`] - Deadline bookkeeping

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "mock")]
extern crate alloc;

pub mod serial;
pub mod time;

#[cfg(feature = "mock")]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use serial::{Serial, SerialConfig, SerialRx, SerialTx};
pub use time::MonotonicClock;
