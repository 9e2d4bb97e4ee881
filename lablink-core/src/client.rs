//! Application-facing client
//!
//! [`LabClient`] bundles the command channel, the debounce filter and the
//! link configuration behind the calls an application makes once per tick:
//! raw GET/SET, analog percent, debounced buttons and the accelerometer.
//!
//! Any error means "no fresh value this tick". Applications keep their
//! previous state and carry on.

use lablink_hal::{MonotonicClock, Serial};
use lablink_protocol::IoType;
use tracing::{debug, info};

use crate::config::{ConfigError, LinkConfig};
use crate::error::LinkError;
use crate::input::analog::{percent_from_raw, Acceleration};
use crate::input::debounce::DebounceFilter;
use crate::link::channel::{CommandChannel, LinkStats};

/// Link to one lab board
pub struct LabClient<P, C> {
    channel: CommandChannel<P, C>,
    debounce: DebounceFilter,
    config: LinkConfig,
}

impl<P, C> LabClient<P, C>
where
    P: Serial,
    C: MonotonicClock,
{
    /// Validate `config`, drain boot text from `port` and return a ready client
    pub fn connect(port: P, clock: C, config: LinkConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut channel =
            CommandChannel::new(port, clock).with_set_echo_check(config.verify_set_echo);
        let flushed = channel.flush_startup(config.flush_total(), config.flush_line());
        info!(flushed, "link ready");

        Ok(Self {
            channel,
            debounce: DebounceFilter::new(config.debounce_window()),
            config,
        })
    }

    pub fn stats(&self) -> LinkStats {
        self.channel.stats()
    }

    pub fn channel_mut(&mut self) -> &mut CommandChannel<P, C> {
        &mut self.channel
    }

    pub fn debounce(&self) -> &DebounceFilter {
        &self.debounce
    }

    /// Read a raw value
    pub fn get(&mut self, io_type: IoType, channel: u16) -> Result<i32, LinkError> {
        let timeout = self.config.command_timeout();
        self.channel.get(io_type, channel, timeout)
    }

    /// Write a raw value
    pub fn set(&mut self, io_type: IoType, channel: u16, value: i32) -> Result<(), LinkError> {
        let timeout = self.config.command_timeout();
        self.channel.set(io_type, channel, value, timeout)
    }

    /// Read an analog channel as 0–100 % of ADC full scale
    pub fn get_analog_percent(&mut self, channel: u16) -> Result<f64, LinkError> {
        let raw = self.get(IoType::Analog, channel)?;
        Ok(percent_from_raw(raw, self.config.adc_full_scale))
    }

    /// Poll a button; true exactly once per debounced press
    ///
    /// A failed read returns false and leaves the debounce state untouched.
    pub fn get_button_debounced(&mut self, channel: u16) -> bool {
        let level = match self.get(IoType::Digital, channel) {
            Ok(level) => level,
            Err(e) => {
                debug!(channel, error = %e, "button read failed");
                return false;
            }
        };
        let now = self.channel.clock().now();
        self.debounce.update(channel, level, now)
    }

    /// Read all three accelerometer axes
    ///
    /// Fails as a whole if any axis fails.
    pub fn get_accel(&mut self) -> Result<Acceleration, LinkError> {
        let axes = self.config.accel_channels;
        let x = self.get_analog_percent(axes.x)?;
        let y = self.get_analog_percent(axes.y)?;
        let z = self.get_analog_percent(axes.z)?;
        Ok(Acceleration::from_percent(x, y, z))
    }
}
