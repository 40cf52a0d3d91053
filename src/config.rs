//! Driver configuration.
//!
//! The controller accepts exactly one setting, the serial device path. Line
//! settings (57600-8-N-1) are fixed by the hardware.
//!
//! ```toml
//! port = "/dev/ttyUSB0"
//! ```

use crate::error::{Result, Rx09Error};
use serde::Deserialize;

/// Configuration for an RX09 controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rx09Config {
    /// Serial port path (e.g., "/dev/ttyUSB0", "COM3")
    pub port: String,
}

impl Rx09Config {
    /// Parse and validate a config table.
    pub fn from_toml(config: &toml::Value) -> Result<Self> {
        let cfg: Self = config
            .clone()
            .try_into()
            .map_err(|e| Rx09Error::InvalidConfig(e.to_string()))?;
        if cfg.port.trim().is_empty() {
            return Err(Rx09Error::InvalidConfig("port must not be empty".into()));
        }
        Ok(cfg)
    }
}
