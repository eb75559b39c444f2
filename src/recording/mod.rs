//! # Recording
//!
//! Owns a parsed, time-ordered sample sequence together with its summary
//! statistics, and exposes the two extraction modes:
//!
//! - **Single maximum**: crop around the strongest of the precomputed global
//!   per-channel extrema.
//! - **Multiple triggers**: run [`MultiTriggerDetector`] and crop one window
//!   per trigger, in detection order.
//!
//! A recording is read-only after construction, so repeated extraction calls
//! with the same parameters return identical windows.

mod summary;


pub use summary::RecordingSummary;

use chrono::TimeDelta;
use log::{debug, info};

use crate::config::ExtractionConfig;
use crate::sample::Sample;
use crate::trigger::{
    extrema, ChannelSelection, GlobalExtrema, MultiTriggerDetector, PeakRecord, Polarity,
    TriggerError, TriggerSet,
};
use crate::window::{Window, WindowCropper};

/// A complete in-memory accelerometer recording.
#[derive(Debug, Clone)]
pub struct Recording {
    name: String,
    samples: Vec<Sample>,
    extrema: GlobalExtrema,
    mean_interval: TimeDelta,
}

impl Recording {
    /// Build a recording from time-ordered samples.
    ///
    /// Ordering is the caller's responsibility and is not checked.
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Result<Self, TriggerError> {
        let extrema = extrema::scan(&samples)?;
        let mean_interval = mean_interval(&samples);
        let recording = Self {
            name: name.into(),
            samples,
            extrema,
            mean_interval,
        };
        debug!(
            "Loaded recording '{}' with {} samples",
            recording.name,
            recording.len()
        );
        Ok(recording)
    }

    /// Source name, usually the input file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All samples in order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Per-channel global extrema.
    pub fn extrema(&self) -> &GlobalExtrema {
        &self.extrema
    }

    /// Mean time between samples: total span divided by sample count.
    pub fn mean_interval(&self) -> TimeDelta {
        self.mean_interval
    }

    /// Summary statistics for display or serialization.
    pub fn summary(&self) -> RecordingSummary {
        RecordingSummary::from(self)
    }

    /// Strongest global extremum on `channels` that `polarity` admits.
    ///
    /// Channels are visited in selection order and a later candidate must be
    /// strictly stronger, so the first channel wins a tie. Within a channel
    /// the maximum is considered before the minimum.
    pub fn strongest_extremum(
        &self,
        channels: &ChannelSelection,
        polarity: Polarity,
    ) -> Result<PeakRecord, TriggerError> {
        let mut best_value = 0.0;
        let mut best: Option<PeakRecord> = None;

        for channel in channels.iter() {
            let max = self.extrema.max_of(channel);
            let min = self.extrema.min_of(channel);
            if polarity.includes_positive() && max.value > best_value {
                best_value = max.value;
                best = Some(*max);
            }
            if polarity.includes_negative() && min.value.abs() > best_value {
                best_value = min.value.abs();
                best = Some(*min);
            }
        }

        best.ok_or(TriggerError::InsufficientDistinctTriggers {
            requested: 1,
            found: 0,
        })
    }

    /// Crop one window around the strongest global extremum.
    pub fn extract_single_max(&self, config: &ExtractionConfig) -> Result<Window, TriggerError> {
        let peak = self.strongest_extremum(config.channels(), config.polarity())?;
        info!("Maximum peak at sample {}: value {}", peak.index, peak.value);
        Ok(self.cropper(config).crop(&self.samples, peak.index))
    }

    /// Detect triggers for a multi-capture extraction.
    pub fn detect_triggers(&self, config: &ExtractionConfig) -> Result<TriggerSet, TriggerError> {
        MultiTriggerDetector::new(config.channels(), config.polarity(), config.deadzone())
            .detect(&self.samples, config.num_captures())
    }

    /// Crop one window per detected trigger, in detection order.
    pub fn extract_multiple(&self, config: &ExtractionConfig) -> Result<Vec<Window>, TriggerError> {
        let triggers = self.detect_triggers(config)?;
        let cropper = self.cropper(config);
        Ok(triggers
            .iter()
            .map(|trigger| cropper.crop(&self.samples, trigger.index))
            .collect())
    }

    /// Extract in the mode `config` selects.
    pub fn extract(&self, config: &ExtractionConfig) -> Result<Vec<Window>, TriggerError> {
        if config.is_single_max() {
            Ok(vec![self.extract_single_max(config)?])
        } else {
            self.extract_multiple(config)
        }
    }

    fn cropper(&self, config: &ExtractionConfig) -> WindowCropper {
        WindowCropper::new(config.window_size(), config.location_coefficient().ratio())
    }
}

fn mean_interval(samples: &[Sample]) -> TimeDelta {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => {
            let span = last.timestamp - first.timestamp;
            let micros = span.num_microseconds().unwrap_or(i64::MAX);
            TimeDelta::microseconds(micros / samples.len() as i64)
        }
        _ => TimeDelta::zero(),
    }
}
