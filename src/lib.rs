//! Driver for the RX09 multi-channel blind/shade controller.
//!
//! The RX09 drives up to 16 motor channels and is commanded over RS-232 with
//! write-only ASCII telegrams (`TXP,<channel>,<A|B|C>\r`, 57600-8-N-1).
//!
//! ## Crate Structure
//!
//! - **`controller`**: [`Controller`] owns the 16 channels of one device path and
//!   builds [`ChannelGroup`]s.
//! - **`channel`**: [`Channel`] up/down/stop operations and [`ChannelId`].
//! - **`group`**: concurrent fan-out over several channels.
//! - **`stop_guard`**: spacing of stop telegrams across a controller.
//! - **`registry`**: [`ConnectionRegistry`], one open attempt per device path.
//! - **`protocol`**: telegram encoding.
//! - **`serial`**: transport traits and the tokio-serial opener.
//! - **`config`**: TOML driver configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rx09::Controller;
//!
//! let controller = Controller::new("/dev/ttyUSB0");
//! controller.get_channel(5)?.down().await?;
//! controller.get_channel_group(&[])?.stop().await?;
//! ```

pub mod channel;
pub mod config;
pub mod controller;
pub mod error;
pub mod group;
pub mod protocol;
pub mod registry;
pub mod serial;
pub mod stop_guard;

pub use channel::{Channel, ChannelId, CHANNEL_COUNT};
pub use config::Rx09Config;
pub use controller::Controller;
pub use error::{Result, Rx09Error};
pub use group::ChannelGroup;
pub use protocol::{encode, Command, Direction};
pub use registry::ConnectionRegistry;
#[cfg(feature = "serial")]
pub use serial::NativeOpener;
pub use serial::{DynSerial, PortOpener, SharedPort};
pub use stop_guard::STOP_SPACING;
