//! Global per-channel extrema of a recording.
//!
//! [`scan`] makes one pass over the samples and keeps, for each channel, the
//! earliest sample holding the highest and the lowest value.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::TriggerError;
use crate::sample::{Channel, Sample, CHANNEL_COUNT};

/// Reference to one sample's value on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakRecord {
    /// Position of the sample in the recording
    pub index: usize,
    /// Timestamp of the sample
    pub timestamp: NaiveDateTime,
    /// Raw channel value
    pub value: f64,
}

impl PeakRecord {
    fn at(samples: &[Sample], index: usize, channel: Channel) -> Self {
        let sample = &samples[index];
        Self {
            index,
            timestamp: sample.timestamp,
            value: sample.value(channel),
        }
    }
}

/// Highest and lowest value of every channel over a whole recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlobalExtrema {
    /// Per-channel maxima in x, y, z order
    pub max: [PeakRecord; CHANNEL_COUNT],
    /// Per-channel minima in x, y, z order
    pub min: [PeakRecord; CHANNEL_COUNT],
}

impl GlobalExtrema {
    /// Global maximum of `channel`.
    pub fn max_of(&self, channel: Channel) -> &PeakRecord {
        &self.max[channel.index()]
    }

    /// Global minimum of `channel`.
    pub fn min_of(&self, channel: Channel) -> &PeakRecord {
        &self.min[channel.index()]
    }
}

/// Compute the per-channel global maxima and minima.
///
/// Ties keep the earliest occurrence. With the `parallel` feature the three
/// channels are scanned on separate rayon tasks; channels are independent so
/// the result is the same.
pub fn scan(samples: &[Sample]) -> Result<GlobalExtrema, TriggerError> {
    if samples.is_empty() {
        return Err(TriggerError::EmptyRecording);
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        let per_channel: Vec<(PeakRecord, PeakRecord)> = Channel::ALL
            .par_iter()
            .map(|&channel| scan_channel(samples, channel))
            .collect();

        let mut extrema = GlobalExtrema {
            max: [per_channel[0].0; CHANNEL_COUNT],
            min: [per_channel[0].1; CHANNEL_COUNT],
        };
        for (channel, (max, min)) in Channel::ALL.iter().zip(per_channel) {
            extrema.max[channel.index()] = max;
            extrema.min[channel.index()] = min;
        }
        Ok(extrema)
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut max_idx = [0usize; CHANNEL_COUNT];
        let mut min_idx = [0usize; CHANNEL_COUNT];

        for (i, sample) in samples.iter().enumerate().skip(1) {
            for c in 0..CHANNEL_COUNT {
                let value = sample.channels[c];
                if value > samples[max_idx[c]].channels[c] {
                    max_idx[c] = i;
                }
                if value < samples[min_idx[c]].channels[c] {
                    min_idx[c] = i;
                }
            }
        }

        Ok(GlobalExtrema {
            max: Channel::ALL.map(|ch| PeakRecord::at(samples, max_idx[ch.index()], ch)),
            min: Channel::ALL.map(|ch| PeakRecord::at(samples, min_idx[ch.index()], ch)),
        })
    }
}

/// Maximum and minimum of a single channel; `samples` must be non-empty.
#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
fn scan_channel(samples: &[Sample], channel: Channel) -> (PeakRecord, PeakRecord) {
    let mut max_idx = 0;
    let mut min_idx = 0;
    for (i, sample) in samples.iter().enumerate().skip(1) {
        let value = sample.value(channel);
        if value > samples[max_idx].value(channel) {
            max_idx = i;
        }
        if value < samples[min_idx].value(channel) {
            min_idx = i;
        }
    }
    (
        PeakRecord::at(samples, max_idx, channel),
        PeakRecord::at(samples, min_idx, channel),
    )
}
