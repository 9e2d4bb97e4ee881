//! Host configuration
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! [port]
//! name = "/dev/ttyACM0"   # or "3" for COM3 on Windows
//! baudrate = 115200
//!
//! [link]
//! command_timeout_ms = 1000
//! debounce_ms = 100
//! adc_full_scale = 4095
//! accel_channels = { x = 23, y = 24, z = 25 }
//!
//! [log]
//! level = "info"
//! ```
//!
//! Precedence, lowest first: built-in defaults, the file, `LABLINK_PORT` /
//! `LABLINK_BAUD`, then command-line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lablink_core::LinkConfig;
use lablink_hal::SerialConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::HostError;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "lablink.toml";

/// Environment variable overriding the port name
pub const PORT_ENV: &str = "LABLINK_PORT";

/// Environment variable overriding the baud rate
pub const BAUD_ENV: &str = "LABLINK_BAUD";

/// Serial port selection and line settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    /// Device name; `None` until given by file, environment or flag
    pub name: Option<String>,
    #[serde(flatten)]
    pub line: SerialConfig,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete host configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub port: PortConfig,
    pub link: LinkConfig,
    pub log: LogConfig,
}

impl HostConfig {
    /// Parse configuration text
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load configuration
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] is used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, HostError> {
        let config = match path {
            Some(path) => Self::read_file(path)?,
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                match fs::read_to_string(&path) {
                    Ok(text) => Self::parse_file(&path, &text)?,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                        Self::default()
                    }
                    Err(source) => return Err(HostError::ConfigRead { path, source }),
                }
            }
        };

        config.link.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, HostError> {
        let text = fs::read_to_string(path).map_err(|source| HostError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_file(path, &text)
    }

    fn parse_file(path: &Path, text: &str) -> Result<Self, HostError> {
        let config = Self::from_toml(text).map_err(|source| HostError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Apply `LABLINK_PORT` and `LABLINK_BAUD` from the process environment
    pub fn apply_env(&mut self) -> Result<(), HostError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), HostError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(PORT_ENV).filter(|name| !name.trim().is_empty()) {
            self.port.name = Some(name);
        }
        if let Some(baud) = lookup(BAUD_ENV) {
            self.port.line.baudrate = baud.trim().parse().map_err(|_| HostError::InvalidEnv {
                name: BAUD_ENV,
                value: baud.clone(),
            })?;
        }
        Ok(())
    }
}
