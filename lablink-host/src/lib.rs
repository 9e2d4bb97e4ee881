//! PC-side host for Lablink boards
//!
//! Binds the board-agnostic link engine in `lablink-core` to a real serial
//! port and the system clock, and adds what a desktop program needs around
//! it:
//!
//! - [`SerialTransport`]: `serialport`-backed implementation of the HAL traits
//! - [`StdClock`]: monotonic clock on `std::time::Instant`
//! - [`HostConfig`]: TOML file plus environment overrides
//! - [`init_logging`]: `tracing-subscriber` setup
//! - [`LabApp`] / [`run_app`]: fixed-period poll/update/render loop
//! - [`MonitorApp`]: text-mode input monitor built on that loop
//! - [`cli`]: argument parsing for the `lablink` binary

#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod transport;

pub use app::{run_app, LabApp};
pub use clock::StdClock;
pub use config::HostConfig;
pub use error::HostError;
pub use logging::init_logging;
pub use monitor::{MonitorApp, MonitorOptions};
pub use transport::{list_ports, PortInfo, SerialTransport};
