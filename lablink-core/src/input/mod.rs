//! Input conditioning
//!
//! Turns raw board readings into values an application can use directly.

pub mod analog;
pub mod debounce;

pub use analog::{percent_from_raw, unit_from_percent, Acceleration};
pub use debounce::{ChannelDebounceState, DebounceFilter};
