use std::ops::RangeInclusive;

/// Sample positions already claimed by an accepted trigger.
///
/// Each accepted trigger claims `[center - radius, center + radius]`,
/// clamped to the recording, so no later trigger can land on the same event.
#[derive(Debug, Clone, Default)]
pub struct DeadzoneTracker {
    len: usize,
    zones: Vec<RangeInclusive<usize>>,
}

impl DeadzoneTracker {
    /// Tracker for a recording of `len` samples.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            zones: Vec::new(),
        }
    }

    /// Claim every index within `radius` of `center`.
    pub fn exclude(&mut self, center: usize, radius: usize) {
        if self.len == 0 {
            return;
        }
        let lower = center.saturating_sub(radius);
        let upper = center.saturating_add(radius).min(self.len - 1);
        if lower <= upper {
            self.zones.push(lower..=upper);
        }
    }

    /// Whether `index` lies inside any claimed zone.
    pub fn is_excluded(&self, index: usize) -> bool {
        self.zones.iter().any(|zone| zone.contains(&index))
    }

    #[cfg(test)]
    fn zones(&self) -> &[RangeInclusive<usize>] {
        &self.zones
    }

    #[cfg(test)]
    fn excluded_count(&self) -> usize {
        (0..self.len).filter(|&i| self.is_excluded(i)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclude_is_inclusive() {
        let mut tracker = DeadzoneTracker::new(1000);
        tracker.exclude(100, 50);
        assert!(tracker.is_excluded(50));
        assert!(tracker.is_excluded(100));
        assert!(tracker.is_excluded(150));
        assert!(!tracker.is_excluded(49));
        assert!(!tracker.is_excluded(151));
        assert_eq!(tracker.excluded_count(), 101);
    }

    #[test]
    fn test_exclude_clamps_to_recording() {
        let mut tracker = DeadzoneTracker::new(20);
        tracker.exclude(3, 10);
        tracker.exclude(18, 10);
        assert_eq!(tracker.zones(), &[0..=13, 8..=19]);
        assert_eq!(tracker.excluded_count(), 20);
    }

    #[test]
    fn test_zero_radius_claims_only_center() {
        let mut tracker = DeadzoneTracker::new(10);
        tracker.exclude(4, 0);
        assert!(tracker.is_excluded(4));
        assert!(!tracker.is_excluded(3));
        assert!(!tracker.is_excluded(5));
    }

    #[test]
    fn test_empty_recording_claims_nothing() {
        let mut tracker = DeadzoneTracker::new(0);
        tracker.exclude(0, 5);
        assert!(tracker.zones().is_empty());
        assert!(!tracker.is_excluded(0));
    }
}
