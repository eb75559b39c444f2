//! # Trigger Detection
//!
//! Locates the peaks that anchor extracted windows.
//!
//! ## Components
//!
//! - [`ChannelSelection`]: validated, ordered set of axes allowed to trigger
//! - [`Polarity`]: positive spikes, negative spikes, or both
//! - [`extrema::scan`]: one-pass global maximum/minimum per channel
//! - [`DeadzoneTracker`]: index ranges claimed by accepted triggers
//! - [`MultiTriggerDetector`]: N-pass search for the strongest separated peaks
//!
//! The search compares raw magnitudes only; there is no filtering or
//! peak-shape analysis.

mod axis;
mod deadzone;
mod detector;
mod error;
pub mod extrema;
mod polarity;


pub use axis::ChannelSelection;
pub use deadzone::DeadzoneTracker;
pub use detector::{detect, MultiTriggerDetector, Trigger, TriggerSet};
pub use error::TriggerError;
pub use extrema::{GlobalExtrema, PeakRecord};
pub use polarity::Polarity;
