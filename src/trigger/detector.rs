use chrono::NaiveDateTime;
use log::{debug, info};
use serde::Serialize;

use super::{ChannelSelection, DeadzoneTracker, Polarity, TriggerError};
use crate::sample::{Channel, Sample};

/// A sample position selected as the anchor of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trigger {
    /// Position of the sample in the recording
    pub index: usize,
    /// Timestamp of the sample
    pub timestamp: NaiveDateTime,
    /// Channel whose value won the search
    pub channel: Channel,
    /// Raw channel value at the trigger
    pub value: f64,
    /// Magnitude the trigger was ranked by (raw value or its absolute value)
    pub magnitude: f64,
}

/// Triggers in detection order (strongest remaining peak first).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriggerSet {
    triggers: Vec<Trigger>,
}

impl TriggerSet {
    /// Sample indices in detection order.
    pub fn indices(&self) -> Vec<usize> {
        self.triggers.iter().map(|t| t.index).collect()
    }

    /// Number of triggers.
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Whether no trigger was found.
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Iterate in detection order.
    pub fn iter(&self) -> std::slice::Iter<'_, Trigger> {
        self.triggers.iter()
    }

    /// Triggers as a slice.
    pub fn as_slice(&self) -> &[Trigger] {
        &self.triggers
    }
}

impl IntoIterator for TriggerSet {
    type Item = Trigger;
    type IntoIter = std::vec::IntoIter<Trigger>;

    fn into_iter(self) -> Self::IntoIter {
        self.triggers.into_iter()
    }
}

impl<'a> IntoIterator for &'a TriggerSet {
    type Item = &'a Trigger;
    type IntoIter = std::slice::Iter<'a, Trigger>;

    fn into_iter(self) -> Self::IntoIter {
        self.triggers.iter()
    }
}

/// Repeated-rescan search for the N strongest mutually separated peaks.
///
/// Every capture is an independent pass over the whole recording with the
/// threshold reset to zero. Channels are visited in selection order and
/// samples in index order; a candidate must be strictly stronger than the
/// best so far, so the first one seen wins a tie. Each accepted trigger
/// claims its deadzone before the next pass starts.
#[derive(Debug, Clone)]
pub struct MultiTriggerDetector<'a> {
    channels: &'a ChannelSelection,
    polarity: Polarity,
    deadzone_radius: usize,
}

impl<'a> MultiTriggerDetector<'a> {
    /// Create a detector over `channels`.
    pub fn new(channels: &'a ChannelSelection, polarity: Polarity, deadzone_radius: usize) -> Self {
        Self {
            channels,
            polarity,
            deadzone_radius,
        }
    }

    /// Find `num_captures` triggers in `samples`.
    ///
    /// Fails with [`TriggerError::InsufficientDistinctTriggers`] as soon as a
    /// pass finds no eligible candidate.
    pub fn detect(&self, samples: &[Sample], num_captures: usize) -> Result<TriggerSet, TriggerError> {
        if samples.is_empty() {
            return Err(TriggerError::EmptyRecording);
        }

        let mut deadzone = DeadzoneTracker::new(samples.len());
        let mut triggers = Vec::with_capacity(num_captures);

        for capture in 0..num_captures {
            debug!("Searching for trigger #{}", capture + 1);
            let trigger = self.find_next(samples, &deadzone).ok_or(
                TriggerError::InsufficientDistinctTriggers {
                    requested: num_captures,
                    found: capture,
                },
            )?;
            info!(
                "Found trigger #{} at sample {} on {}: value {}",
                capture + 1,
                trigger.index,
                trigger.channel,
                trigger.value
            );
            deadzone.exclude(trigger.index, self.deadzone_radius);
            triggers.push(trigger);
        }

        Ok(TriggerSet { triggers })
    }

    /// Strongest sample outside the deadzone, if any beats zero.
    pub fn find_next(&self, samples: &[Sample], deadzone: &DeadzoneTracker) -> Option<Trigger> {
        let mut best_value = 0.0;
        let mut best: Option<Trigger> = None;

        for channel in self.channels.iter() {
            for (i, sample) in samples.iter().enumerate() {
                let value = sample.value(channel);

                let magnitude = if self.polarity.includes_positive() && value > best_value {
                    value
                } else if self.polarity.includes_negative() && value.abs() > best_value {
                    value.abs()
                } else {
                    continue;
                };

                if deadzone.is_excluded(i) {
                    continue;
                }

                best_value = magnitude;
                best = Some(Trigger {
                    index: i,
                    timestamp: sample.timestamp,
                    channel,
                    value,
                    magnitude,
                });
            }
        }

        best
    }
}

/// Find up to `num_captures` triggers; see [`MultiTriggerDetector`].
pub fn detect(
    samples: &[Sample],
    channels: &ChannelSelection,
    polarity: Polarity,
    num_captures: usize,
    deadzone_radius: usize,
) -> Result<TriggerSet, TriggerError> {
    MultiTriggerDetector::new(channels, polarity, deadzone_radius).detect(samples, num_captures)
}
