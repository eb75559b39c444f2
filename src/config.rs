//! Typed extraction parameters, validated once at construction.

use num::rational::Ratio;
use num::{One, Zero};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::trigger::{ChannelSelection, Polarity, TriggerError};

/// Default number of captures in multi-trigger mode.
pub const DEFAULT_NUM_CAPTURES: usize = 3;

/// Default number of samples per extracted window.
pub const DEFAULT_WINDOW_SIZE: usize = 300;

/// Default axis selector.
pub const DEFAULT_AXES: &str = "xyz";

/// Fraction of a window that precedes its trigger, kept as an exact rational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationCoefficient(Ratio<i64>);

impl LocationCoefficient {
    /// Build `numer / denom`; must lie in `[0, 1]`.
    pub fn new(numer: i64, denom: i64) -> Result<Self, TriggerError> {
        if denom == 0 {
            return Err(TriggerError::invalid_config(
                "location coefficient denominator is zero",
            ));
        }
        if numer == i64::MIN || denom == i64::MIN {
            return Err(TriggerError::invalid_config(format!(
                "location coefficient {numer}/{denom} is out of range"
            )));
        }
        Self::from_ratio(Ratio::new(numer, denom))
    }

    /// Wrap an existing ratio; must lie in `[0, 1]`.
    pub fn from_ratio(ratio: Ratio<i64>) -> Result<Self, TriggerError> {
        if ratio < Ratio::zero() || ratio > Ratio::one() {
            return Err(TriggerError::invalid_config(format!(
                "location coefficient must lie in [0, 1], got {ratio}"
            )));
        }
        Ok(Self(ratio))
    }

    /// Underlying ratio.
    pub fn ratio(&self) -> Ratio<i64> {
        self.0
    }

    /// Approximate value, for display and plotting only.
    pub fn to_f64(&self) -> f64 {
        *self.0.numer() as f64 / *self.0.denom() as f64
    }
}

impl Default for LocationCoefficient {
    fn default() -> Self {
        Self(Ratio::new(1, 5))
    }
}

impl fmt::Display for LocationCoefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for LocationCoefficient {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for LocationCoefficient {
    type Err = TriggerError;

    /// Accepts `"1/5"`, `"0.25"` and `"1"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || TriggerError::invalid_config(format!("cannot parse location coefficient '{s}'"));

        if let Some((numer, denom)) = s.split_once('/') {
            let numer: i64 = numer.trim().parse().map_err(|_| invalid())?;
            let denom: i64 = denom.trim().parse().map_err(|_| invalid())?;
            return Self::new(numer, denom);
        }

        match s.split_once('.') {
            Some((whole, fraction)) => {
                if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                let digits = u32::try_from(fraction.len()).map_err(|_| invalid())?;
                let denom = 10i64.checked_pow(digits).ok_or_else(invalid)?;
                let whole: i64 = if whole.is_empty() {
                    0
                } else {
                    whole.parse().map_err(|_| invalid())?
                };
                let fraction: i64 = fraction.parse().map_err(|_| invalid())?;
                let magnitude = whole
                    .checked_abs()
                    .and_then(|w| w.checked_mul(denom))
                    .and_then(|w| w.checked_add(fraction))
                    .ok_or_else(invalid)?;
                let numer = if s.starts_with('-') { -magnitude } else { magnitude };
                Self::new(numer, denom)
            }
            None => {
                let whole: i64 = s.parse().map_err(|_| invalid())?;
                Self::from_ratio(Ratio::from_integer(whole))
            }
        }
    }
}

/// Validated parameters for one extraction call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionConfig {
    #[serde(serialize_with = "serialize_display")]
    channels: ChannelSelection,
    polarity: Polarity,
    num_captures: usize,
    deadzone: usize,
    window_size: usize,
    location_coefficient: LocationCoefficient,
    max_mode: bool,
}

fn serialize_display<T: fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            channels: ChannelSelection::all(),
            polarity: Polarity::Both,
            num_captures: DEFAULT_NUM_CAPTURES,
            deadzone: DEFAULT_WINDOW_SIZE / 4,
            window_size: DEFAULT_WINDOW_SIZE,
            location_coefficient: LocationCoefficient::default(),
            max_mode: false,
        }
    }
}

impl ExtractionConfig {
    /// Start from the defaults.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }

    /// Channels allowed to trigger.
    pub fn channels(&self) -> &ChannelSelection {
        &self.channels
    }

    /// Trigger polarity.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Number of captures requested in multi-trigger mode.
    pub fn num_captures(&self) -> usize {
        self.num_captures
    }

    /// Deadzone radius in samples.
    pub fn deadzone(&self) -> usize {
        self.deadzone
    }

    /// Samples per window.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Fraction of the window before the trigger.
    pub fn location_coefficient(&self) -> LocationCoefficient {
        self.location_coefficient
    }

    /// Whether only the single strongest global extremum is extracted.
    ///
    /// One capture behaves like maximum mode.
    pub fn is_single_max(&self) -> bool {
        self.max_mode || self.num_captures == 1
    }
}

/// Builder for [`ExtractionConfig`]; unset values take the defaults.
#[derive(Debug, Clone, Default)]
pub struct ExtractionConfigBuilder {
    channels: Option<ChannelSelection>,
    polarity: Option<Polarity>,
    num_captures: Option<usize>,
    deadzone: Option<usize>,
    window_size: Option<usize>,
    location_coefficient: Option<LocationCoefficient>,
    max_mode: bool,
}

impl ExtractionConfigBuilder {
    /// Set the trigger channels.
    pub fn channels(mut self, channels: ChannelSelection) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Resolve and set the trigger channels from a selector string.
    pub fn axes(mut self, spec: &str) -> Result<Self, TriggerError> {
        self.channels = Some(ChannelSelection::resolve(spec)?);
        Ok(self)
    }

    /// Set the polarity.
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = Some(polarity);
        self
    }

    /// Set the number of captures.
    pub fn num_captures(mut self, num_captures: usize) -> Self {
        self.num_captures = Some(num_captures);
        self
    }

    /// Set the deadzone radius; defaults to a quarter of the window size.
    pub fn deadzone(mut self, deadzone: usize) -> Self {
        self.deadzone = Some(deadzone);
        self
    }

    /// Set the window size.
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = Some(window_size);
        self
    }

    /// Set the location coefficient.
    pub fn location_coefficient(mut self, coefficient: LocationCoefficient) -> Self {
        self.location_coefficient = Some(coefficient);
        self
    }

    /// Force single-maximum mode.
    pub fn max_mode(mut self, max_mode: bool) -> Self {
        self.max_mode = max_mode;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<ExtractionConfig, TriggerError> {
        let window_size = self.window_size.unwrap_or(DEFAULT_WINDOW_SIZE);
        if window_size == 0 {
            return Err(TriggerError::invalid_config("window size must be positive"));
        }

        let num_captures = self.num_captures.unwrap_or(DEFAULT_NUM_CAPTURES);
        if num_captures == 0 {
            return Err(TriggerError::invalid_config(
                "number of captures must be positive",
            ));
        }

        Ok(ExtractionConfig {
            channels: self.channels.unwrap_or_default(),
            polarity: self.polarity.unwrap_or_default(),
            num_captures,
            deadzone: self.deadzone.unwrap_or(window_size / 4),
            window_size,
            location_coefficient: self.location_coefficient.unwrap_or_default(),
            max_mode: self.max_mode,
        })
    }
}
