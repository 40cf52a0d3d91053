//! RX09 ASCII command telegrams.
//!
//! Protocol Overview:
//! - Format: ASCII, write-only (the controller does not answer)
//! - Serial: 57600 baud, 8N1, no flow control
//! - Telegram: `TXP,<channel>,<direction>\r`
//! - Channel: two-digit zero-padded number, `01`..`16`
//! - Direction: `A` (up), `B` (down), `C` (stop)
//!
//! The RS-232 device address is always 01 and is not part of the telegram.
//!
//! Example: channel 5 down → `TXP,05,B\r`

use crate::channel::ChannelId;
use std::fmt;

/// Telegram type tag for transmit commands.
pub const TELEGRAM: &str = "TXP";

/// Telegram terminator.
pub const TERMINATOR: char = '\r';

/// Motion command for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Raise the shade.
    Up,
    /// Lower the shade.
    Down,
    /// Halt any motion in progress.
    Stop,
}

impl Direction {
    /// Protocol letter for this direction.
    pub fn code(self) -> char {
        match self {
            Self::Up => 'A',
            Self::Down => 'B',
            Self::Stop => 'C',
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = char;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        match code {
            'A' => Ok(Self::Up),
            'B' => Ok(Self::Down),
            'C' => Ok(Self::Stop),
            other => Err(other),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stop => "stop",
        };
        write!(f, "{}", label)
    }
}

/// Render a telegram for a raw channel number.
///
/// Only the width is padded; numbers of 100 or more produce a three-digit
/// field the controller will not understand. Use [`ChannelId`] to stay within
/// the valid range.
pub fn encode(channel: u8, direction: Direction) -> String {
    format!(
        "{},{:02},{}{}",
        TELEGRAM,
        channel,
        direction.code(),
        TERMINATOR
    )
}

/// A single addressed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Target channel.
    pub channel: ChannelId,
    /// Requested motion.
    pub direction: Direction,
}

impl Command {
    /// Create a command for `channel`.
    pub fn new(channel: ChannelId, direction: Direction) -> Self {
        Self { channel, direction }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.channel.get(), self.direction))
    }
}
