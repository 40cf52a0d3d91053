//! Addressable RX09 channels.
//!
//! A [`Channel`] is a cheap handle: its id plus a reference to the link it
//! shares with the other 15 channels of its controller (device path,
//! connection registry, stop guard). Channels never own the port; they acquire
//! it from the registry for every command.

use crate::error::{Result, Rx09Error};
use crate::protocol::{Command, Direction};
use crate::registry::ConnectionRegistry;
use crate::stop_guard::StopGuard;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{instrument, Instrument};

/// Number of channels on an RX09.
pub const CHANNEL_COUNT: u8 = 16;

/// Validated channel number in `1..=16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId(u8);

impl ChannelId {
    /// Validate a raw channel number.
    pub fn new(id: i64) -> Result<Self> {
        match u8::try_from(id) {
            Ok(n) if (1..=CHANNEL_COUNT).contains(&n) => Ok(Self(n)),
            _ => Err(Rx09Error::InvalidChannelId(id)),
        }
    }

    /// Channel number as used on the wire.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position in the controller's channel list.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// All channel ids in ascending order.
    pub fn all() -> impl Iterator<Item = ChannelId> {
        (1..=CHANNEL_COUNT).map(ChannelId)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State shared by all channels of one controller.
pub(crate) struct Link {
    pub(crate) path: String,
    pub(crate) registry: Arc<ConnectionRegistry>,
    pub(crate) stop_guard: StopGuard,
}

/// One motor channel of an RX09 controller.
#[derive(Clone)]
pub struct Channel {
    id: ChannelId,
    link: Arc<Link>,
}

impl Channel {
    pub(crate) fn new(id: ChannelId, link: Arc<Link>) -> Self {
        Self { id, link }
    }

    /// This channel's id.
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Device path of the owning controller.
    pub fn device_path(&self) -> &str {
        &self.link.path
    }

    /// Raise the shade.
    #[instrument(skip(self), fields(channel = self.id.get()), err)]
    pub async fn up(&self) -> Result<()> {
        self.send(Direction::Up).await
    }

    /// Lower the shade.
    #[instrument(skip(self), fields(channel = self.id.get()), err)]
    pub async fn down(&self) -> Result<()> {
        self.send(Direction::Down).await
    }

    /// Stop the shade.
    ///
    /// The stop slot is reserved when this is called, not when the returned
    /// future is first polled, so stops reach the wire in call order and at
    /// least [`STOP_SPACING`](crate::STOP_SPACING) apart across all channels of
    /// the controller.
    ///
    /// The slot stays taken even if the returned future is dropped unpolled:
    /// no telegram is sent, but later stops still wait their turn behind it.
    pub fn stop(&self) -> impl Future<Output = Result<()>> + Send + 'static {
        let start = self.link.stop_guard.reserve();
        let channel = self.clone();
        let span = tracing::info_span!("stop", channel = channel.id.get());
        span.in_scope(|| {
            tracing::debug!(
                delay_ms = start
                    .saturating_duration_since(tokio::time::Instant::now())
                    .as_millis() as u64,
                "Reserved RX09 stop slot"
            )
        });

        async move {
            tokio::time::sleep_until(start).await;
            let result = channel.send(Direction::Stop).await;
            if let Err(e) = &result {
                tracing::error!(error = %e);
            }
            result
        }
        .instrument(span)
    }

    /// Write one telegram for this channel.
    ///
    /// Bypasses stop spacing; prefer [`stop`](Self::stop) for stops.
    pub async fn send(&self, direction: Direction) -> Result<()> {
        let port = self.link.registry.acquire(&self.link.path).await?;
        let telegram = Command::new(self.id, direction).to_string();

        let mut guard = port.lock().await;
        guard
            .write_all(telegram.as_bytes())
            .await
            .map_err(|e| Rx09Error::write_failed(self.id.get(), e))?;
        guard
            .flush()
            .await
            .map_err(|e| Rx09Error::write_failed(self.id.get(), e))?;

        tracing::debug!(
            port = %self.link.path,
            channel = self.id.get(),
            %direction,
            "Sent RX09 command"
        );
        Ok(())
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("id", &self.id)
            .field("path", &self.link.path)
            .finish()
    }
}
