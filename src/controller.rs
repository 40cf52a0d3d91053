//! RX09 controller bound to one serial device path.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rx09::Controller;
//!
//! let controller = Controller::new("/dev/ttyUSB0");
//!
//! controller.get_channel(3)?.down().await?;
//! controller.get_channel_group(&[1, 2])?.stop().await?;
//!
//! // Empty list selects all 16 channels
//! controller.get_channel_group(&[])?.up().await?;
//! ```

use crate::channel::{Channel, ChannelId, Link};
use crate::config::Rx09Config;
use crate::error::{Result, Rx09Error};
use crate::group::ChannelGroup;
use crate::registry::ConnectionRegistry;
use crate::stop_guard::StopGuard;
use std::fmt;
use std::sync::Arc;

/// Driver for one RX09 blind/shade controller.
///
/// Owns the 16 channels and the stop guard they share. The serial port itself
/// belongs to the [`ConnectionRegistry`]; controllers built on the same
/// registry and path write through the same port.
pub struct Controller {
    link: Arc<Link>,
    channels: Vec<Channel>,
}

impl Controller {
    /// Create a controller on the process-wide registry.
    ///
    /// Nothing is opened until the first command is sent.
    #[cfg(feature = "serial")]
    pub fn new(device_path: impl Into<String>) -> Self {
        Self::with_registry(device_path, ConnectionRegistry::global())
    }

    /// Create a controller that acquires its port from `registry`.
    pub fn with_registry(device_path: impl Into<String>, registry: Arc<ConnectionRegistry>) -> Self {
        let link = Arc::new(Link {
            path: device_path.into(),
            registry,
            stop_guard: StopGuard::new(),
        });
        let channels = ChannelId::all()
            .map(|id| Channel::new(id, Arc::clone(&link)))
            .collect();

        tracing::debug!(port = %link.path, "Created RX09 controller");
        Self { link, channels }
    }

    /// Create a controller from a driver config table.
    #[cfg(feature = "serial")]
    pub fn from_config(config: &toml::Value) -> Result<Self> {
        let cfg = Rx09Config::from_toml(config)?;
        Ok(Self::new(cfg.port))
    }

    /// Create a controller from a driver config table on `registry`.
    pub fn from_config_with_registry(
        config: &toml::Value,
        registry: Arc<ConnectionRegistry>,
    ) -> Result<Self> {
        let cfg = Rx09Config::from_toml(config)?;
        Ok(Self::with_registry(cfg.port, registry))
    }

    /// Serial device path this controller talks to.
    pub fn device_path(&self) -> &str {
        &self.link.path
    }

    /// Registry the controller acquires its port from.
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.link.registry
    }

    /// Look up one channel.
    ///
    /// # Errors
    ///
    /// [`Rx09Error::InvalidChannelId`] for ids outside `1..=16`.
    pub fn get_channel(&self, id: i64) -> Result<&Channel> {
        let id = ChannelId::new(id)?;
        self.channels
            .get(id.index())
            .ok_or(Rx09Error::InvalidChannelId(i64::from(id.get())))
    }

    /// Look up several channels, in the requested order.
    ///
    /// An empty list returns all 16 channels in ascending order. Any invalid
    /// id fails the whole lookup.
    pub fn get_channels(&self, ids: &[i64]) -> Result<Vec<&Channel>> {
        if ids.is_empty() {
            return Ok(self.channels.iter().collect());
        }
        ids.iter().map(|&id| self.get_channel(id)).collect()
    }

    /// Group the requested channels (all channels for an empty list).
    pub fn get_channel_group(&self, ids: &[i64]) -> Result<ChannelGroup<'_>> {
        Ok(ChannelGroup::new(self.get_channels(ids)?))
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("path", &self.link.path)
            .field("channels", &self.channels.len())
            .finish()
    }
}
