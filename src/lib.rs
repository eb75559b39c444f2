//! # shockcrop - Shock Event Extraction for Accelerometer Recordings
//!
//! `shockcrop` reduces a long three-axis accelerometer capture to short clips
//! centered on its shock and impact events.
//!
//! ## Key Features
//!
//! - **Peak Triggering**: Finds the N strongest peaks on any combination of
//!   the x, y and z axes, on positive excursions, negative excursions, or both.
//!
//! - **Deadzones**: Each accepted trigger claims the samples around it, so one
//!   physical event is never reported twice.
//!
//! - **Exact Window Placement**: Windows of a fixed size are positioned with a
//!   rational location coefficient; no floating-point drift in the bounds.
//!
//! - **Sensor Connect Input**: Reads LORD MicroStrain Sensor Connect CSV
//!   exports and writes each window back out as CSV (and optionally SVG).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shockcrop::config::ExtractionConfig;
//! use shockcrop::ingest;
//! use shockcrop::recording::Recording;
//! use shockcrop::writer::{output_paths, write_windows};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = Path::new("impact_test.csv");
//! let recording = Recording::new("impact_test.csv", ingest::read_path(input)?)?;
//!
//! let config = ExtractionConfig::builder()
//!     .axes("xz")?
//!     .num_captures(3)
//!     .window_size(300)
//!     .build()?;
//!
//! let windows = recording.extract(&config)?;
//! let stats = write_windows(&windows, &output_paths(input, None, windows.len()))?;
//! println!("{stats}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`sample`]: time-stamped three-axis samples
//! - [`trigger`]: axis selection, global extrema, deadzones, multi-trigger search
//! - [`window`]: window bounds and clipping
//! - [`config`]: validated extraction parameters
//! - [`recording`]: the in-memory recording and both extraction modes
//! - [`ingest`]: Sensor Connect CSV reader
//! - [`writer`]: window CSV output
//! - `plot`: SVG rendering (feature `plot`)

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod ingest;
#[cfg(feature = "plot")]
pub mod plot;
pub mod recording;
pub mod sample;
pub mod trigger;
pub mod window;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ExtractionConfig, ExtractionConfigBuilder, LocationCoefficient};
    pub use crate::ingest::{IngestError, SensorConnectReader};
    #[cfg(feature = "plot")]
    pub use crate::plot::{render_window_svg, PlotError, PlotStyle};
    pub use crate::recording::{Recording, RecordingSummary};
    pub use crate::sample::{Channel, Sample};
    pub use crate::trigger::{
        ChannelSelection, DeadzoneTracker, GlobalExtrema, MultiTriggerDetector, PeakRecord,
        Polarity, Trigger, TriggerError, TriggerSet,
    };
    pub use crate::window::{Window, WindowCropper};
    pub use crate::writer::{output_paths, write_windows, WindowWriter, WriterError, WriterStats};
}
