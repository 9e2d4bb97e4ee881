//! Logging initialisation

use tracing_subscriber::EnvFilter;

use crate::error::HostError;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. `"info"` or
/// `"lablink_core=debug,info"`) is used. Output goes to stderr so command
/// results on stdout stay machine-readable.
pub fn init_logging(default_level: &str) -> Result<(), HostError> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), default_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| HostError::Logging(e.to_string()))
}

fn build_filter(env: Option<&str>, default_level: &str) -> Result<EnvFilter, HostError> {
    let directives = match env {
        Some(env) if !env.trim().is_empty() => env,
        _ => default_level,
    };
    EnvFilter::try_new(directives).map_err(|e| HostError::Logging(e.to_string()))
}
