//! Analog scaling
//!
//! Raw ADC codes map linearly onto 0–100 % of full scale. The accelerometer
//! axes sit at mid-scale when level, so each percent maps onto roughly
//! −1..+1 around that point.

/// Map a raw ADC code onto 0.0–100.0 % of `full_scale`
///
/// Codes outside `0..=full_scale` are not clamped.
pub fn percent_from_raw(raw: i32, full_scale: u16) -> f64 {
    f64::from(raw) / f64::from(full_scale) * 100.0
}

/// Map 0–100 % onto −1.0..+1.0 around mid-scale
pub fn unit_from_percent(percent: f64) -> f64 {
    (percent - 50.0) / 50.0
}

/// Three-axis acceleration in signed unit range
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Acceleration {
    /// Build from per-axis percent readings
    pub fn from_percent(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: unit_from_percent(x),
            y: unit_from_percent(y),
            z: unit_from_percent(z),
        }
    }
}
