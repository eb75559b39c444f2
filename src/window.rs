//! # Window Cropping
//!
//! A window of `size` samples is placed around a trigger so that
//! `floor(size * lc)` samples precede it:
//!
//! ```text
//! begin = center - floor(size * lc)
//! end   = center + ceil(size * (1 - lc))      (half-open)
//! ```
//!
//! Both bounds come from the same exact rational product, so a window that
//! fits inside the recording always holds exactly `size` samples. Bounds that
//! fall outside `[0, N)` are clipped: the window gets shorter instead of
//! failing. [`Window::is_clipped`] tells the two cases apart.

use log::warn;
use num::rational::Ratio;
use serde::Serialize;

use crate::sample::Sample;

/// Nominal half-open index range of a window, before clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropBounds {
    /// First index (may be negative)
    pub begin: i64,
    /// One past the last index (may exceed the recording length)
    pub end: i64,
}

/// Cuts fixed-size windows out of a sample sequence.
///
/// The coefficient is not range-checked here; values outside `[0, 1]` shift
/// the window past its trigger. [`crate::config::LocationCoefficient`] is the
/// validated form.
#[derive(Debug, Clone, Copy)]
pub struct WindowCropper {
    window_size: usize,
    coefficient: Ratio<i64>,
}

impl WindowCropper {
    /// Cropper for windows of `window_size` samples.
    pub fn new(window_size: usize, coefficient: Ratio<i64>) -> Self {
        Self {
            window_size,
            coefficient,
        }
    }

    /// Nominal bounds of the window around `center`.
    ///
    /// The products are taken in `i128`, so any `i64` ratio with a coefficient
    /// in `[0, 1]` is exact; out-of-range coefficients saturate instead of
    /// wrapping.
    pub fn bounds(&self, center: usize) -> CropBounds {
        let mut numer = i128::from(*self.coefficient.numer());
        let mut denom = i128::from(*self.coefficient.denom());
        if denom < 0 {
            numer = -numer;
            denom = -denom;
        }

        let size = self.window_size as i128;
        let lead = size.saturating_mul(numer).div_euclid(denom);
        let trail = size
            .saturating_mul(denom - numer)
            .saturating_neg()
            .div_euclid(denom)
            .saturating_neg();

        let center = center as i128;
        CropBounds {
            begin: saturate_i64(center.saturating_sub(lead)),
            end: saturate_i64(center.saturating_add(trail)),
        }
    }

    /// Copy the window around `center` out of `samples`, clipped to the recording.
    pub fn crop(&self, samples: &[Sample], center: usize) -> Window {
        let nominal = self.bounds(center);
        let len = samples.len() as i64;
        let begin = nominal.begin.clamp(0, len);
        let end = nominal.end.clamp(begin, len);

        let window = Window {
            samples: samples[begin as usize..end as usize].to_vec(),
            begin: begin as usize,
            trigger_index: center,
            requested_len: self.window_size,
            nominal,
        };

        if window.is_clipped() {
            warn!(
                "Window around sample {} clipped to [{}, {}): {} of {} samples",
                center,
                begin,
                end,
                window.len(),
                self.window_size
            );
        }

        window
    }
}

fn saturate_i64(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Crop `window_size` samples around `center`; see [`WindowCropper`].
pub fn crop(samples: &[Sample], center: usize, window_size: usize, coefficient: Ratio<i64>) -> Window {
    WindowCropper::new(window_size, coefficient).crop(samples, center)
}

/// An independent copy of a contiguous run of samples around a trigger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Window {
    samples: Vec<Sample>,
    begin: usize,
    trigger_index: usize,
    requested_len: usize,
    nominal: CropBounds,
}

impl Window {
    /// Samples of the window.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Actual number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether clipping left nothing.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Recording index of the first sample.
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Recording index one past the last sample.
    pub fn end(&self) -> usize {
        self.begin + self.samples.len()
    }

    /// Bounds before clipping.
    pub fn nominal_bounds(&self) -> CropBounds {
        self.nominal
    }

    /// Window size that was asked for.
    pub fn requested_len(&self) -> usize {
        self.requested_len
    }

    /// Whether the recording boundary shortened the window.
    pub fn is_clipped(&self) -> bool {
        self.nominal.begin != self.begin as i64 || self.nominal.end != self.end() as i64
    }

    /// Recording index of the trigger.
    pub fn trigger_index(&self) -> usize {
        self.trigger_index
    }

    /// Position of the trigger inside the window.
    pub fn trigger_offset(&self) -> Option<usize> {
        (self.begin..self.end())
            .contains(&self.trigger_index)
            .then(|| self.trigger_index - self.begin)
    }

    /// The trigger sample, if it lies inside the window.
    pub fn trigger_sample(&self) -> Option<&Sample> {
        self.trigger_offset().map(|offset| &self.samples[offset])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use proptest::prelude::*;

    fn ramp(len: usize) -> Vec<Sample> {
        let start = NaiveDate::from_ymd_opt(2016, 5, 24)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        (0..len)
            .map(|i| Sample::new(start + TimeDelta::milliseconds(i as i64), i as f64, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn test_bounds_default_coefficient() {
        let cropper = WindowCropper::new(300, Ratio::new(1, 5));
        assert_eq!(cropper.bounds(500), CropBounds { begin: 440, end: 740 });
    }

    #[test]
    fn test_bounds_fractional_product() {
        // 7 * 1/3 = 2.33: two samples before, five from the trigger on
        let cropper = WindowCropper::new(7, Ratio::new(1, 3));
        assert_eq!(cropper.bounds(10), CropBounds { begin: 8, end: 15 });
    }

    #[test]
    fn test_bounds_extreme_coefficients() {
        assert_eq!(
            WindowCropper::new(10, Ratio::from_integer(0)).bounds(50),
            CropBounds { begin: 50, end: 60 }
        );
        assert_eq!(
            WindowCropper::new(10, Ratio::from_integer(1)).bounds(50),
            CropBounds { begin: 40, end: 50 }
        );
    }

    #[test]
    fn test_bounds_with_large_denominator() {
        // 37 * 999999999999999999 does not fit in i64
        let lc: crate::config::LocationCoefficient = "0.999999999999999999".parse().unwrap();
        let cropper = WindowCropper::new(37, lc.ratio());
        assert_eq!(cropper.bounds(1000), CropBounds { begin: 964, end: 1001 });

        let cropper = WindowCropper::new(300, Ratio::new(1, i64::MAX));
        assert_eq!(cropper.bounds(500), CropBounds { begin: 500, end: 800 });
    }

    #[test]
    fn test_bounds_saturate_for_huge_coefficient() {
        let cropper = WindowCropper::new(usize::MAX, Ratio::from_integer(i64::MAX));
        let bounds = cropper.bounds(0);
        assert_eq!(bounds.begin, i64::MIN);
        let samples = ramp(10);
        assert!(cropper.crop(&samples, 0).is_empty());
    }

    #[test]
    fn test_crop_inside_bounds() {
        let samples = ramp(1000);
        let window = crop(&samples, 500, 300, Ratio::new(1, 5));
        assert_eq!(window.len(), 300);
        assert_eq!(window.begin(), 440);
        assert_eq!(window.end(), 740);
        assert_eq!(window.trigger_offset(), Some(60));
        assert_eq!(window.trigger_sample().unwrap().channels[0], 500.0);
        assert!(!window.is_clipped());
    }

    #[test]
    fn test_crop_clipped_at_start() {
        let samples = ramp(1000);
        let window = crop(&samples, 20, 300, Ratio::new(1, 5));
        assert_eq!(window.begin(), 0);
        assert_eq!(window.end(), 260);
        assert_eq!(window.len(), 260);
        assert_eq!(window.trigger_offset(), Some(20));
        assert!(window.is_clipped());
        assert_eq!(window.nominal_bounds().begin, -40);
    }

    #[test]
    fn test_crop_clipped_at_end() {
        let samples = ramp(1000);
        let window = crop(&samples, 990, 300, Ratio::new(1, 5));
        assert_eq!(window.begin(), 930);
        assert_eq!(window.end(), 1000);
        assert!(window.is_clipped());
        assert_eq!(window.requested_len(), 300);
    }

    #[test]
    fn test_crop_coefficient_above_one_leaves_trigger_outside() {
        let samples = ramp(100);
        let window = crop(&samples, 50, 10, Ratio::new(3, 2));
        assert_eq!(window.nominal_bounds(), CropBounds { begin: 35, end: 45 });
        assert_eq!(window.len(), 10);
        assert_eq!(window.trigger_offset(), None);
    }

    #[test]
    fn test_crop_is_a_copy() {
        let mut samples = ramp(50);
        let window = crop(&samples, 25, 10, Ratio::new(1, 2));
        samples[25].channels[0] = -1.0;
        assert_eq!(window.trigger_sample().unwrap().channels[0], 25.0);
    }

    proptest! {
        #[test]
        fn prop_unclipped_window_has_exact_size(
            size in 1usize..500,
            numer in 0i64..=64,
            center in 0usize..2000,
        ) {
            let cropper = WindowCropper::new(size, Ratio::new(numer, 64));
            let bounds = cropper.bounds(center);
            prop_assert_eq!(bounds.end - bounds.begin, size as i64);
            prop_assert!(bounds.begin <= center as i64 && center as i64 <= bounds.end);
        }
    }
}
