//! TOML configuration file support for repeated extraction runs.
//!
//! Settings that would otherwise be passed as flags can live in a config file:
//!
//! ```toml
//! # shockcrop.toml
//! [extraction]
//! axes = "xz"
//! polarity = "+-"
//! num_captures = 5
//! deadzone = 100
//! window_size = 400
//! location_coefficient = "1/4"
//!
//! [plot]
//! title = "Drop test, fixture B"
//! ```
//!
//! Flags given on the command line override values from the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Root configuration structure for shockcrop.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Extraction settings.
    #[serde(default)]
    pub extraction: ExtractionSection,

    /// Plot settings.
    #[serde(default)]
    pub plot: PlotSection,
}

/// Configuration for the extract command.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractionSection {
    /// Axes allowed to trigger, e.g. "xz".
    pub axes: Option<String>,

    /// Trigger polarity: "+", "-" or "+-".
    pub polarity: Option<String>,

    /// Number of captures to extract.
    pub num_captures: Option<usize>,

    /// Deadzone radius in samples.
    pub deadzone: Option<usize>,

    /// Samples per window.
    pub window_size: Option<usize>,

    /// Location coefficient, either a fraction string or a number.
    pub location_coefficient: Option<CoefficientValue>,

    /// Single-max mode.
    pub max_mode: Option<bool>,
}

/// Plot appearance.
#[derive(Debug, Default, Deserialize)]
pub struct PlotSection {
    /// Chart title.
    pub title: Option<String>,
}

/// A location coefficient as written in TOML: `"1/5"` or `0.2`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoefficientValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for CoefficientValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoefficientValue::Text(text) => f.write_str(text),
            CoefficientValue::Number(value) => write!(f, "{value}"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
