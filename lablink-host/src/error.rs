//! Host error type

use std::io;
use std::path::PathBuf;

use lablink_core::{ConfigError, LinkError};
use thiserror::Error;

/// Everything that can stop the host program
#[derive(Debug, Error)]
pub enum HostError {
    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid link configuration: {0}")]
    ConfigInvalid(ConfigError),

    #[error("invalid value {value:?} in {name}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("no serial port given; use --port or set LABLINK_PORT")]
    NoPort,

    #[error("serial port {name} unavailable: {source}")]
    PortUnavailable {
        name: String,
        #[source]
        source: serialport::Error,
    },

    #[error("cannot enumerate serial ports: {0}")]
    PortList(#[source] serialport::Error),

    #[error("link error: {0}")]
    Link(LinkError),

    #[error("cannot initialise logging: {0}")]
    Logging(String),

    #[error("output error: {0}")]
    Output(#[from] io::Error),
}

impl HostError {
    /// The link-level failure behind this error, if any
    pub fn link_error(&self) -> Option<LinkError> {
        match self {
            HostError::PortUnavailable { .. } | HostError::NoPort => {
                Some(LinkError::PortUnavailable)
            }
            HostError::Link(e) => Some(*e),
            _ => None,
        }
    }
}

impl From<LinkError> for HostError {
    fn from(e: LinkError) -> Self {
        HostError::Link(e)
    }
}

impl From<ConfigError> for HostError {
    fn from(e: ConfigError) -> Self {
        HostError::ConfigInvalid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_error_message() {
        let e = HostError::from(LinkError::Timeout);
        assert_eq!(e.to_string(), "link error: timed out waiting for a matching acknowledgement");
    }

    #[test]
    fn test_link_error_kind() {
        assert_eq!(HostError::NoPort.link_error(), Some(LinkError::PortUnavailable));
        assert_eq!(
            HostError::from(LinkError::Timeout).link_error(),
            Some(LinkError::Timeout)
        );
        assert_eq!(HostError::Logging("x".to_string()).link_error(), None);
    }

    #[test]
    fn test_config_error_message() {
        let e = HostError::from(ConfigError::ZeroFullScale);
        assert_eq!(
            e.to_string(),
            "invalid link configuration: adc_full_scale must be greater than zero"
        );
    }
}
