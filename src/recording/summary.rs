use serde::Serialize;
use std::fmt;

use super::Recording;
use crate::sample::{Channel, CHANNEL_COUNT};
use crate::trigger::PeakRecord;

/// Timestamp format used for peaks in the summary (minutes and below).
const PEAK_TIME_FORMAT: &str = "%M:%S%.6f";

/// Summary statistics about a recording
#[derive(Debug, Clone, Serialize)]
pub struct RecordingSummary {
    /// Source name
    pub name: String,
    /// Number of samples
    pub sample_count: usize,
    /// Mean sample interval in microseconds
    pub mean_interval_us: i64,
    /// Per-channel maxima (x, y, z)
    pub max: [PeakRecord; CHANNEL_COUNT],
    /// Per-channel minima (x, y, z)
    pub min: [PeakRecord; CHANNEL_COUNT],
}

impl From<&Recording> for RecordingSummary {
    fn from(recording: &Recording) -> Self {
        Self {
            name: recording.name().to_string(),
            sample_count: recording.len(),
            mean_interval_us: recording.mean_interval().num_microseconds().unwrap_or(i64::MAX),
            max: recording.extrema().max,
            min: recording.extrema().min,
        }
    }
}

impl RecordingSummary {
    fn write_peaks(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        peaks: &[PeakRecord; CHANNEL_COUNT],
    ) -> fmt::Result {
        write!(f, "<")?;
        for (i, channel) in Channel::ALL.iter().enumerate() {
            let peak = &peaks[channel.index()];
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{}{}; {}@{}",
                channel,
                label,
                peak.value,
                peak.timestamp.format(PEAK_TIME_FORMAT)
            )?;
        }
        write!(f, ">")
    }
}

impl fmt::Display for RecordingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<{}; containing {} samples, {}.{:06} seconds per sample>",
            self.name,
            self.sample_count,
            self.mean_interval_us.div_euclid(1_000_000),
            self.mean_interval_us.rem_euclid(1_000_000)
        )?;
        Self::write_peaks(f, "Max", &self.max)?;
        writeln!(f)?;
        Self::write_peaks(f, "Min", &self.min)
    }
}
