//! Serial link engine
//!
//! - [`deadline`] - Monotonic deadline bookkeeping
//! - [`reader`] - Deadline-bounded line reading
//! - [`flush`] - Startup drain of boot text
//! - [`channel`] - GET/SET exchanges with reply matching

pub mod channel;
pub mod deadline;
pub mod flush;
pub mod reader;

pub use channel::{CommandChannel, LinkStats};
pub use deadline::Deadline;
pub use flush::flush_startup;
pub use reader::LineReader;
