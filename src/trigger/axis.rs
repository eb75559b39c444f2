use std::fmt;
use std::str::FromStr;

use super::TriggerError;
use crate::sample::{Channel, CHANNEL_COUNT};

/// Ordered, duplicate-free, non-empty set of channels that may initiate a trigger.
///
/// Order follows first occurrence in the selector string and is significant:
/// when two channels hold equally strong peaks, the one listed first wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSelection {
    channels: Vec<Channel>,
}

impl ChannelSelection {
    /// Resolve a selector such as `"xyz"`, `"zx"` or `"y"`.
    pub fn resolve(spec: &str) -> Result<Self, TriggerError> {
        let mut channels = Vec::with_capacity(CHANNEL_COUNT);

        for c in spec.chars() {
            let channel = Channel::from_name(c).ok_or_else(|| {
                TriggerError::invalid_axis(spec, format!("'{c}' is not one of x, y, z"))
            })?;
            if channels.contains(&channel) {
                return Err(TriggerError::invalid_axis(
                    spec,
                    format!("channel '{c}' is listed more than once"),
                ));
            }
            channels.push(channel);
        }

        if channels.is_empty() {
            return Err(TriggerError::invalid_axis(spec, "no channel selected"));
        }

        Ok(Self { channels })
    }

    /// Every channel, in x, y, z order.
    pub fn all() -> Self {
        Self {
            channels: Channel::ALL.to_vec(),
        }
    }

    /// Selected channels in tie-break order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Iterate over the selected channels in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.iter().copied()
    }

    /// Whether `channel` is part of the selection.
    pub fn contains(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }

    /// Number of selected channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always false; a selection holds at least one channel.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Default for ChannelSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for ChannelSelection {
    type Err = TriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl fmt::Display for ChannelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in &self.channels {
            write!(f, "{channel}")?;
        }
        Ok(())
    }
}
