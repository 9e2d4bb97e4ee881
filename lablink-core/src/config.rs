//! Link configuration
//!
//! All timings are construction parameters. Millisecond integers keep the
//! type `Copy`, `defmt`-printable and easy to write in TOML.

use core::fmt;
use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum wait for a matching acknowledgement
pub const DEFAULT_COMMAND_TIMEOUT_MS: u32 = 1000;

/// Total time allowed to drain boot text at startup
pub const DEFAULT_FLUSH_TOTAL_MS: u32 = 2000;

/// Per-line wait while draining; silence this long ends the flush
pub const DEFAULT_FLUSH_LINE_MS: u32 = 50;

/// Minimum time a button must read pressed before it counts
pub const DEFAULT_DEBOUNCE_MS: u32 = 100;

/// 12-bit ADC full-scale code
pub const DEFAULT_ADC_FULL_SCALE: u16 = 4095;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// ADC full scale of zero would divide by zero
    ZeroFullScale,
    /// Per-line flush budget longer than the total flush budget
    FlushLineExceedsTotal,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroFullScale => f.write_str("adc_full_scale must be greater than zero"),
            ConfigError::FlushLineExceedsTotal => {
                f.write_str("flush_line_ms must not exceed flush_total_ms")
            }
        }
    }
}

/// Analog channels wired to the accelerometer axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AccelChannels {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl Default for AccelChannels {
    fn default() -> Self {
        Self { x: 23, y: 24, z: 25 }
    }
}

/// Link timing and scaling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Deadline for one GET/SET exchange (ms)
    pub command_timeout_ms: u32,
    /// Total startup flush budget (ms)
    pub flush_total_ms: u32,
    /// Per-line startup flush budget (ms)
    pub flush_line_ms: u32,
    /// Debounce window (ms)
    pub debounce_ms: u32,
    /// Largest raw code the board's ADC reports
    pub adc_full_scale: u16,
    /// Accelerometer axis channels
    pub accel_channels: AccelChannels,
    /// Also require a SET acknowledgement to echo the requested value
    pub verify_set_echo: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            command_timeout_ms: DEFAULT_COMMAND_TIMEOUT_MS,
            flush_total_ms: DEFAULT_FLUSH_TOTAL_MS,
            flush_line_ms: DEFAULT_FLUSH_LINE_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            adc_full_scale: DEFAULT_ADC_FULL_SCALE,
            accel_channels: AccelChannels::default(),
            verify_set_echo: false,
        }
    }
}

impl LinkConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.command_timeout_ms))
    }

    pub fn flush_total(&self) -> Duration {
        Duration::from_millis(u64::from(self.flush_total_ms))
    }

    pub fn flush_line(&self) -> Duration {
        Duration::from_millis(u64::from(self.flush_line_ms))
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_ms))
    }

    /// Check the configuration for values the link cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adc_full_scale == 0 {
            return Err(ConfigError::ZeroFullScale);
        }
        if self.flush_line_ms > self.flush_total_ms {
            return Err(ConfigError::FlushLineExceedsTotal);
        }
        Ok(())
    }
}
