//! Command-line interface for the `lablink` binary

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Args, Parser, Subcommand};
use lablink_protocol::IoType;

use crate::monitor::MonitorOptions;

/// Talk to a Lablink board over a serial port
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "lablink",
    version,
    long_about = None,
    after_help = "LABLINK_PORT and LABLINK_BAUD override the config file; --port overrides both."
)]
pub struct Cli {
    /// Config file (default: ./lablink.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Serial port name, or a COM port number on Windows
    #[arg(long, global = true, value_name = "NAME")]
    pub port: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// List available serial ports
    ListPorts,

    /// Read a raw value
    Get {
        /// digital, analog, servo or a raw integer
        #[arg(value_parser = parse_io_type)]
        io_type: IoType,
        channel: u16,
    },

    /// Write a raw value
    Set {
        /// digital, analog, servo or a raw integer
        #[arg(value_parser = parse_io_type)]
        io_type: IoType,
        channel: u16,
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },

    /// Read an analog channel as percent of full scale
    Percent { channel: u16 },

    /// Read the accelerometer
    Accel,

    /// Print inputs every frame; type q and Enter to quit
    Monitor(MonitorArgs),
}

impl CliCommand {
    /// True if the command talks to a board
    pub fn needs_port(&self) -> bool {
        !matches!(self, CliCommand::ListPorts)
    }
}

/// Inputs and pacing for `monitor`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[command(group(
    ArgGroup::new("inputs")
        .required(true)
        .multiple(true)
        .args(["button", "analog", "accel"])
))]
pub struct MonitorArgs {
    /// Digital channel counted as a debounced button
    #[arg(long, value_name = "CH")]
    pub button: Option<u16>,

    /// Analog channel shown as percent (repeatable)
    #[arg(long, value_name = "CH")]
    pub analog: Vec<u16>,

    /// Also read the accelerometer
    #[arg(long)]
    pub accel: bool,

    /// Frame period in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 50)]
    pub period: u64,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,
}

impl MonitorArgs {
    pub fn options(&self) -> MonitorOptions {
        MonitorOptions {
            button: self.button,
            analog: self.analog.clone(),
            accel: self.accel,
            max_frames: self.frames,
        }
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.period)
    }
}

fn parse_io_type(text: &str) -> Result<IoType, String> {
    text.parse()
        .map_err(|_| format!("expected digital, analog, servo or an integer, got {:?}", text))
}
