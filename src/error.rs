//! Error types for the RX09 driver.
//!
//! `Rx09Error` is `Clone` because a failed connection open is cached per device
//! path and handed to every operation that depends on it. I/O sources are kept
//! behind an `Arc` for that reason.

use std::sync::Arc;
use thiserror::Error;

/// Convenience alias for results using the driver error type.
pub type Result<T> = std::result::Result<T, Rx09Error>;

/// Primary error type for the RX09 driver.
///
/// # Error Categories
///
/// 1. **Caller errors** - `InvalidChannelId`, `InvalidConfig`
///    - Raised synchronously, before anything touches the serial port
///    - Recovery: fix the argument
///
/// 2. **Transport errors** - `ConnectionOpen`, `WriteFailed`
///    - `ConnectionOpen` is permanent for the lifetime of the registry that
///      cached it; no reconnection is attempted
///    - `WriteFailed` affects only the command that produced it
///
/// 3. **Runtime errors** - `TaskFailed`
///    - A group member task panicked or was aborted by the runtime
#[derive(Error, Debug, Clone)]
pub enum Rx09Error {
    /// Channel lookup with an id outside `1..=16`.
    #[error("Invalid channel ID: {0}")]
    InvalidChannelId(i64),

    /// The serial port for `path` could not be opened.
    ///
    /// Cached by the connection registry: every later operation against the
    /// same path fails with this same error.
    #[error("Failed to open RX09 serial port {path}: {source}")]
    ConnectionOpen {
        /// Device path that failed to open.
        path: String,
        /// Underlying transport error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Writing a command telegram to the port failed.
    #[error("RX09 write failed for channel {channel}: {source}")]
    WriteFailed {
        /// Channel the command was addressed to.
        channel: u8,
        /// Underlying transport error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A spawned group member did not run to completion.
    #[error("RX09 channel task failed: {0}")]
    TaskFailed(String),

    /// Driver configuration could not be parsed.
    #[error("Invalid RX09 config: {0}")]
    InvalidConfig(String),
}

impl Rx09Error {
    pub(crate) fn connection_open(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ConnectionOpen {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn write_failed(channel: u8, source: std::io::Error) -> Self {
        Self::WriteFailed {
            channel,
            source: Arc::new(source),
        }
    }

    /// Returns true for errors caused by the serial transport.
    #[cfg(test)]
    pub(crate) fn is_transport(&self) -> bool {
        matches!(self, Self::ConnectionOpen { .. } | Self::WriteFailed { .. })
    }
}
