//! Time-stamped three-axis samples.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of measured axes in every sample.
pub const CHANNEL_COUNT: usize = 3;

/// One of the three measured axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::X, Channel::Y, Channel::Z];

    /// Position of this channel inside [`Sample::channels`].
    pub fn index(self) -> usize {
        match self {
            Channel::X => 0,
            Channel::Y => 1,
            Channel::Z => 2,
        }
    }

    /// Single-character name used in axis selectors.
    pub fn name(self) -> char {
        match self {
            Channel::X => 'x',
            Channel::Y => 'y',
            Channel::Z => 'z',
        }
    }

    /// Look up a channel by its selector character.
    pub fn from_name(name: char) -> Option<Self> {
        match name {
            'x' => Some(Channel::X),
            'y' => Some(Channel::Y),
            'z' => Some(Channel::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single accelerometer reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Acquisition time (microsecond resolution)
    pub timestamp: NaiveDateTime,
    /// Channel values in x, y, z order
    pub channels: [f64; CHANNEL_COUNT],
}

impl Sample {
    /// Create a sample from its timestamp and x/y/z values.
    pub fn new(timestamp: NaiveDateTime, x: f64, y: f64, z: f64) -> Self {
        Self {
            timestamp,
            channels: [x, y, z],
        }
    }

    /// Value recorded on `channel`.
    #[inline]
    pub fn value(&self, channel: Channel) -> f64 {
        self.channels[channel.index()]
    }

    /// Whether every channel value is finite.
    pub fn is_finite(&self) -> bool {
        self.channels.iter().all(|v| v.is_finite())
    }
}
